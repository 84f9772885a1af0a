use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::{AuthenticatedUser, ClientUser};
use crate::cache::categories::CategoryCache;
use crate::db::categories as category_db;
use crate::db::proposals as proposal_db;
use crate::db::requests as request_db;
use crate::db::users as user_db;
use crate::errors::ApiError;
use crate::models::requests::{CreateServiceRequest, RequestDetail, UpdateServiceRequest};
use crate::models::users::{ClientSummary, UserType};

/// Provider feed size for open requests.
const OPEN_FEED_LIMIT: u64 = 50;

/// POST /api/requests — a client posts a new service request.
pub async fn create_request(
    user: ClientUser,
    db: web::Data<DatabaseConnection>,
    categories: web::Data<Arc<CategoryCache>>,
    body: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // 1. The category must exist.
    if categories
        .get(db.get_ref(), input.category_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Category not found".to_string()));
    }

    // 2. Store the request, open by default.
    let request = request_db::insert_request(db.get_ref(), input, user.0.id).await?;
    info!("request created: {} by client {}", request.id, user.0.id);

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Request created successfully",
        "request": request,
    })))
}

/// GET /api/requests — role-dependent listing.
///
/// Clients see their own requests, newest first. Providers see the open
/// request feed, capped at 50.
pub async fn list_requests(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let requests = match user.0.user_type {
        UserType::Client => request_db::get_requests_by_client(db.get_ref(), user.0.id).await?,
        UserType::Provider => request_db::get_open_requests(db.get_ref(), OPEN_FEED_LIMIT).await?,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "requests": requests,
    })))
}

/// GET /api/requests/{id} — request detail with the client and category
/// blocks joined in.
pub async fn get_request(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let request = request_db::get_request_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    let client = user_db::get_user_by_id(db.get_ref(), request.client_id).await?;
    let category = category_db::get_category_by_id(db.get_ref(), request.category_id).await?;

    let detail = RequestDetail {
        client: client.as_ref().map(ClientSummary::from),
        category,
        request,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "request": detail,
    })))
}

/// PUT /api/requests/{id} — the owning client patches their request.
///
/// A status change must follow the lifecycle graph: open → in_progress →
/// completed, with cancellation allowed from the two non-terminal states.
pub async fn update_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateServiceRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();

    // 1. Fetch the request and check ownership.
    let request = request_db::get_request_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.client_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    // 2. Validate the status transition, if one is requested. Writing the
    //    current status back is a no-op, not an error.
    if let Some(next) = &input.status {
        if *next != request.status && !request.status.can_transition_to(next) {
            return Err(ApiError::Conflict(format!(
                "Request is {:?} and cannot move to {:?}",
                request.status, next,
            )));
        }
    }

    // 3. Apply the patch.
    let updated = request_db::update_request(db.get_ref(), request, input).await?;
    info!("request updated: {}", updated.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Request updated successfully",
        "request": updated,
    })))
}

/// DELETE /api/requests/{id} — the owning client deletes their request,
/// unless a proposal has already been accepted on it.
pub async fn delete_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    // 1. Fetch the request and check ownership.
    let request = request_db::get_request_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.client_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    // 2. A request with an accepted proposal is a commitment; it can be
    //    cancelled but not erased.
    if proposal_db::get_accepted_proposal(db.get_ref(), id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Cannot delete a request with an accepted proposal".to_string(),
        ));
    }

    // 3. Remove the request with its proposals and messages.
    request_db::delete_request_cascade(db.get_ref(), id).await?;
    info!("request deleted: {}", id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Request deleted successfully",
    })))
}
