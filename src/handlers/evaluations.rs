use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheData, keys};
use crate::db::evaluations as evaluation_db;
use crate::db::proposals as proposal_db;
use crate::db::requests as request_db;
use crate::db::users as user_db;
use crate::errors::ApiError;
use crate::models::evaluations::{
    CreateEvaluation, MyEvaluationsResponse, UserEvaluationsResponse,
};
use crate::models::requests::RequestStatus;

/// Who may evaluate whom on a completed request. The client evaluates the
/// provider whose proposal was accepted; that provider evaluates the
/// client. Nobody else took part in the service.
pub fn check_evaluation_parties(
    request_client_id: Uuid,
    evaluator_id: Uuid,
    evaluated_id: Uuid,
    accepted_provider_id: Option<Uuid>,
) -> Result<(), ApiError> {
    if evaluator_id == request_client_id {
        // Client rates the provider who actually did the work.
        if accepted_provider_id != Some(evaluated_id) {
            return Err(ApiError::Conflict(
                "Provider did not work on this request".to_string(),
            ));
        }
    } else {
        // Provider rates the client, and only if they won the request.
        if accepted_provider_id != Some(evaluator_id) {
            return Err(ApiError::Conflict(
                "You did not work on this request".to_string(),
            ));
        }
        if evaluated_id != request_client_id {
            return Err(ApiError::Conflict(
                "You may only evaluate the client of this request".to_string(),
            ));
        }
    }

    Ok(())
}

/// POST /api/evaluations — rate the other party of a completed request.
pub async fn create_evaluation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    body: web::Json<CreateEvaluation>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    let evaluator_id = user.0.id;

    // 1. The request must exist and be completed.
    let request = request_db::get_request_by_id(db.get_ref(), input.service_request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.status != RequestStatus::Completed {
        return Err(ApiError::Conflict(
            "Only completed services may be evaluated".to_string(),
        ));
    }

    // 2. The evaluated party must exist.
    let evaluated = user_db::get_user_by_id(db.get_ref(), input.evaluated_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Evaluated user not found".to_string()))?;

    // 3. Both parties must belong to the accepted proposal on this request.
    let accepted = proposal_db::get_accepted_proposal(db.get_ref(), request.id).await?;
    check_evaluation_parties(
        request.client_id,
        evaluator_id,
        input.evaluated_id,
        accepted.map(|p| p.provider_id),
    )?;

    // 4. One evaluation per direction per request.
    if evaluation_db::evaluation_exists(db.get_ref(), request.id, evaluator_id, input.evaluated_id)
        .await?
    {
        return Err(ApiError::Conflict(
            "You have already evaluated this user for this service".to_string(),
        ));
    }

    // 5. Store it and refresh the evaluated user's aggregates atomically.
    let evaluated_id = evaluated.id;
    let evaluation =
        evaluation_db::insert_evaluation(db.get_ref(), input, evaluator_id, evaluated).await?;
    info!(
        "evaluation created: {} by {} on {}",
        evaluation.id, evaluator_id, evaluated_id
    );

    // The evaluated user's public page is now stale.
    let _ = cache
        .delete(&keys::user_evaluations(&evaluated_id.to_string()))
        .await;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Evaluation created successfully",
        "evaluation": evaluation,
    })))
}

/// GET /api/evaluations/user/{user_id} — a user's public evaluation page:
/// everything they received, their average and the count. No auth needed.
pub async fn list_by_user(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<CacheData>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let cache_key = keys::user_evaluations(&user_id.to_string());

    // Try the cache first; on a cache error fall through to the database.
    match cache.get::<UserEvaluationsResponse>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => warn!("Cache error: {}", e),
    }

    let user = user_db::get_user_by_id(db.get_ref(), user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let evaluations = evaluation_db::get_received_with_evaluator(db.get_ref(), user_id).await?;

    let response = UserEvaluationsResponse {
        total_evaluations: evaluations.len() as u64,
        average_rating: user.average_rating,
        evaluations,
    };

    // Store in cache (5 minute TTL)
    let _ = cache.set(&cache_key, &response, Some(300)).await;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/evaluations/request/{request_id} — both evaluations on one
/// request, visible only to the two parties involved.
pub async fn list_by_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();
    let user_id = user.0.id;

    let request = request_db::get_request_by_id(db.get_ref(), request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    // The client is always a party; a provider must hold the accepted
    // proposal.
    let mut involved = request.client_id == user_id;
    if !involved {
        let accepted = proposal_db::get_accepted_proposal(db.get_ref(), request_id).await?;
        involved = accepted.map(|p| p.provider_id) == Some(user_id);
    }
    if !involved {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    let evaluations = evaluation_db::get_by_request_with_parties(db.get_ref(), request_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "evaluations": evaluations,
    })))
}

/// GET /api/evaluations/my-evaluations — what the caller received and what
/// they gave, both newest first.
pub async fn my_evaluations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.0.id;

    let received = evaluation_db::get_received_with_evaluator(db.get_ref(), user_id).await?;
    let given = evaluation_db::get_given_with_evaluated(db.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(MyEvaluationsResponse { received, given }))
}
