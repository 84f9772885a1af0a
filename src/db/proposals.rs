use sea_orm::prelude::{DateTimeUtc, Expr};
use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::proposals::{self, CreateProposal, ProposalStatus};
use crate::models::requests::{self, RequestStatus};
use crate::models::users;

/// Insert a new proposal, pending by default.
pub async fn insert_proposal(
    db: &DatabaseConnection,
    input: CreateProposal,
    provider_id: Uuid,
) -> Result<proposals::Model, DbErr> {
    let now = chrono::Utc::now();

    let new_proposal = proposals::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_request_id: Set(input.service_request_id),
        provider_id: Set(provider_id),
        price: Set(input.price),
        estimated_duration: Set(input.estimated_duration),
        description: Set(input.description),
        materials_included: Set(input.materials_included),
        availability: Set(input.availability),
        status: Set(ProposalStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_proposal.insert(db).await
}

/// Fetch a single proposal by ID.
pub async fn get_proposal_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find_by_id(id).one(db).await
}

/// Whether this provider already has a proposal on this request,
/// whatever its status.
pub async fn proposal_exists(
    db: &DatabaseConnection,
    request_id: Uuid,
    provider_id: Uuid,
) -> Result<bool, DbErr> {
    let existing = proposals::Entity::find()
        .filter(proposals::Column::ServiceRequestId.eq(request_id))
        .filter(proposals::Column::ProviderId.eq(provider_id))
        .one(db)
        .await?;

    Ok(existing.is_some())
}

/// Fetch the accepted proposal for a request, if one exists. At most one
/// row can match; acceptance rejects every sibling in the same commit.
pub async fn get_accepted_proposal(
    db: &DatabaseConnection,
    request_id: Uuid,
) -> Result<Option<proposals::Model>, DbErr> {
    proposals::Entity::find()
        .filter(proposals::Column::ServiceRequestId.eq(request_id))
        .filter(proposals::Column::Status.eq(ProposalStatus::Accepted))
        .one(db)
        .await
}

/// Fetch all proposals on a request with each provider's public profile,
/// newest first.
pub async fn get_proposals_for_request_with_provider(
    db: &DatabaseConnection,
    request_id: Uuid,
) -> Result<Vec<proposals::ProposalWithProvider>, DbErr> {
    let rows = proposals::Entity::find()
        .filter(proposals::Column::ServiceRequestId.eq(request_id))
        .find_also_related(users::Entity)
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(proposal, provider)| proposals::ProposalWithProvider {
            proposal,
            provider: provider.as_ref().map(users::ProviderProfile::from),
        })
        .collect())
}

/// Fetch a provider's proposals with the request and its client attached,
/// newest first. Clients are batch-fetched in one query.
pub async fn get_proposals_by_provider_with_request(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<Vec<proposals::ProposalWithRequest>, DbErr> {
    let rows = proposals::Entity::find()
        .filter(proposals::Column::ProviderId.eq(provider_id))
        .find_also_related(requests::Entity)
        .order_by_desc(proposals::Column::CreatedAt)
        .all(db)
        .await?;

    let client_ids: Vec<Uuid> = rows
        .iter()
        .filter_map(|(_, request)| request.as_ref().map(|r| r.client_id))
        .collect();

    let clients: HashMap<Uuid, users::Model> = if client_ids.is_empty() {
        HashMap::new()
    } else {
        users::Entity::find()
            .filter(users::Column::Id.is_in(client_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect()
    };

    Ok(rows
        .into_iter()
        .map(|(proposal, request)| {
            let client = request
                .as_ref()
                .and_then(|r| clients.get(&r.client_id))
                .map(users::ClientRating::from);

            proposals::ProposalWithRequest {
                proposal,
                service_request: request.as_ref().map(requests::RequestSummary::from),
                client,
            }
        })
        .collect())
}

/// Build a status flip that only writes while the proposal is still
/// pending. A row that was already resolved never matches, so acceptance
/// cannot be undone and two racing accepts cannot both win.
pub fn pending_status_update(
    proposal_id: Uuid,
    next: ProposalStatus,
    now: DateTimeUtc,
) -> UpdateMany<proposals::Entity> {
    proposals::Entity::update_many()
        .col_expr(proposals::Column::Status, Expr::value(next))
        .col_expr(proposals::Column::UpdatedAt, Expr::value(now))
        .filter(proposals::Column::Id.eq(proposal_id))
        .filter(proposals::Column::Status.eq(ProposalStatus::Pending))
}

/// Accept a proposal: mark it accepted, move its request to in_progress
/// and reject every other pending proposal on that request, all in one
/// transaction. Returns `None` when the proposal stopped being pending
/// between the caller's check and the write (it lost to a concurrent
/// accept); nothing is committed in that case.
pub async fn accept_proposal(
    db: &DatabaseConnection,
    proposal: proposals::Model,
) -> Result<Option<proposals::Model>, DbErr> {
    let txn = db.begin().await?;
    let now = chrono::Utc::now();
    let proposal_id = proposal.id;
    let request_id = proposal.service_request_id;

    // 1. Mark the winning proposal accepted, guarded on it still being
    //    pending when the write lands.
    let won = pending_status_update(proposal_id, ProposalStatus::Accepted, now)
        .exec(&txn)
        .await?;
    if won.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(None);
    }

    // 2. Move the request to in_progress.
    let request = requests::Entity::find_by_id(request_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Service request not found".to_string()))?;
    let mut request_active: requests::ActiveModel = request.into();
    request_active.status = Set(RequestStatus::InProgress);
    request_active.updated_at = Set(now);
    request_active.update(&txn).await?;

    // 3. Reject the losing pending proposals in bulk.
    proposals::Entity::update_many()
        .col_expr(proposals::Column::Status, Expr::value(ProposalStatus::Rejected))
        .col_expr(proposals::Column::UpdatedAt, Expr::value(now))
        .filter(proposals::Column::ServiceRequestId.eq(request_id))
        .filter(proposals::Column::Id.ne(proposal_id))
        .filter(proposals::Column::Status.eq(ProposalStatus::Pending))
        .exec(&txn)
        .await?;

    // 4. Read the accepted row back for the response body.
    let accepted = proposals::Entity::find_by_id(proposal_id)
        .one(&txn)
        .await?
        .ok_or(DbErr::RecordNotFound("Proposal not found".to_string()))?;

    txn.commit().await?;

    Ok(Some(accepted))
}

/// Reject a single proposal, guarded the same way as acceptance. Returns
/// `None` when the proposal was already resolved, so a reject arriving
/// after an accept cannot overwrite the winner.
pub async fn reject_proposal(
    db: &DatabaseConnection,
    proposal: proposals::Model,
) -> Result<Option<proposals::Model>, DbErr> {
    let now = chrono::Utc::now();

    let updated = pending_status_update(proposal.id, ProposalStatus::Rejected, now)
        .exec(db)
        .await?;
    if updated.rows_affected == 0 {
        return Ok(None);
    }

    get_proposal_by_id(db, proposal.id).await
}
