use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::middleware::{AuthenticatedUser, ProviderUser};
use crate::db::proposals as proposal_db;
use crate::db::requests as request_db;
use crate::errors::ApiError;
use crate::models::proposals::{CreateProposal, ProposalStatus};
use crate::models::requests::RequestStatus;

/// POST /api/proposals — a provider bids on an open request.
///
/// One proposal per provider per request; the request owner cannot bid on
/// their own posting.
pub async fn create_proposal(
    user: ProviderUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProposal>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    let provider_id = user.0.id;

    // 1. The target request must exist and still be open.
    let request = request_db::get_request_by_id(db.get_ref(), input.service_request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.status != RequestStatus::Open {
        return Err(ApiError::Conflict(
            "This request is no longer available".to_string(),
        ));
    }

    // 2. No self-dealing.
    if request.client_id == provider_id {
        return Err(ApiError::Validation(
            "You cannot submit a proposal on your own request".to_string(),
        ));
    }

    // 3. One proposal per provider per request, whatever its status.
    if proposal_db::proposal_exists(db.get_ref(), request.id, provider_id).await? {
        return Err(ApiError::Conflict(
            "You have already sent a proposal for this request".to_string(),
        ));
    }

    // 4. Store the proposal, pending by default.
    let proposal = proposal_db::insert_proposal(db.get_ref(), input, provider_id).await?;
    info!(
        "proposal created: {} on request {} by provider {}",
        proposal.id, proposal.service_request_id, provider_id
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Proposal submitted successfully",
        "proposal": proposal,
    })))
}

/// GET /api/proposals/request/{request_id} — the request owner compares
/// the bids, each with the provider's public profile.
pub async fn list_by_request(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let request_id = path.into_inner();

    let request = request_db::get_request_by_id(db.get_ref(), request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.client_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    let proposals =
        proposal_db::get_proposals_for_request_with_provider(db.get_ref(), request_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "proposals": proposals,
    })))
}

/// POST /api/proposals/{id}/accept — the request owner picks a winner.
///
/// Accepting moves the request to in_progress and rejects every other
/// pending proposal in the same transaction, so at most one proposal per
/// request can ever be accepted.
pub async fn accept_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let proposal_id = path.into_inner();

    // 1. Fetch the proposal and its parent request.
    let proposal = proposal_db::get_proposal_by_id(db.get_ref(), proposal_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Proposal not found".to_string()))?;

    let request = request_db::get_request_by_id(db.get_ref(), proposal.service_request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    // 2. Only the request owner decides.
    if request.client_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    // 3. Only a pending proposal can win.
    if proposal.status != ProposalStatus::Pending {
        return Err(ApiError::Conflict(
            "This proposal is no longer available".to_string(),
        ));
    }

    // 4. Accept atomically. The write is guarded on the proposal still
    //    being pending, so a racing accept that got there first surfaces
    //    as the same conflict as step 3.
    let accepted = proposal_db::accept_proposal(db.get_ref(), proposal)
        .await?
        .ok_or_else(|| ApiError::Conflict("This proposal is no longer available".to_string()))?;
    info!(
        "proposal accepted: {} on request {}",
        accepted.id, accepted.service_request_id
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Proposal accepted successfully",
        "proposal": accepted,
    })))
}

/// POST /api/proposals/{id}/reject — the request owner turns down a
/// single pending proposal.
pub async fn reject_proposal(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let proposal_id = path.into_inner();

    let proposal = proposal_db::get_proposal_by_id(db.get_ref(), proposal_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Proposal not found".to_string()))?;

    let request = request_db::get_request_by_id(db.get_ref(), proposal.service_request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    if request.client_id != user.0.id {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    if proposal.status != ProposalStatus::Pending {
        return Err(ApiError::Conflict(
            "This proposal cannot be rejected".to_string(),
        ));
    }

    let rejected = proposal_db::reject_proposal(db.get_ref(), proposal)
        .await?
        .ok_or_else(|| ApiError::Conflict("This proposal cannot be rejected".to_string()))?;
    info!("proposal rejected: {}", rejected.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Proposal rejected",
        "proposal": rejected,
    })))
}

/// GET /api/proposals/my-proposals — the caller's sent proposals with the
/// request and its client attached. Clients simply get an empty list.
pub async fn my_proposals(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let proposals =
        proposal_db::get_proposals_by_provider_with_request(db.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "proposals": proposals,
    })))
}
