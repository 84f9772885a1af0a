use sea_orm::*;
use uuid::Uuid;

use crate::models::messages;
use crate::models::proposals;
use crate::models::requests::{self, CreateServiceRequest, RequestStatus, UpdateServiceRequest};

/// Insert a new service request, open by default.
pub async fn insert_request(
    db: &DatabaseConnection,
    input: CreateServiceRequest,
    client_id: Uuid,
) -> Result<requests::Model, DbErr> {
    let now = chrono::Utc::now();

    let new_request = requests::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client_id),
        category_id: Set(input.category_id),
        title: Set(input.title),
        description: Set(input.description),
        address: Set(input.address),
        city: Set(input.city),
        state: Set(input.state),
        zip_code: Set(input.zip_code),
        latitude: Set(input.latitude),
        longitude: Set(input.longitude),
        urgency: Set(input.urgency),
        budget_min: Set(input.budget_min),
        budget_max: Set(input.budget_max),
        preferred_date: Set(input.preferred_date),
        status: Set(RequestStatus::Open),
        images: Set(input.images),
        created_at: Set(now),
        updated_at: Set(now),
    };

    new_request.insert(db).await
}

/// Fetch a single service request by ID.
pub async fn get_request_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<requests::Model>, DbErr> {
    requests::Entity::find_by_id(id).one(db).await
}

/// Fetch a client's own requests, newest first.
pub async fn get_requests_by_client(
    db: &DatabaseConnection,
    client_id: Uuid,
) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::ClientId.eq(client_id))
        .order_by_desc(requests::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch open requests for the provider feed, newest first.
pub async fn get_open_requests(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<requests::Model>, DbErr> {
    requests::Entity::find()
        .filter(requests::Column::Status.eq(RequestStatus::Open))
        .order_by_desc(requests::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await
}

/// Apply a patch to an already-loaded request row. Status transitions are
/// validated by the caller before this runs.
pub async fn update_request(
    db: &DatabaseConnection,
    request: requests::Model,
    input: UpdateServiceRequest,
) -> Result<requests::Model, DbErr> {
    let mut active: requests::ActiveModel = request.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(urgency) = input.urgency {
        active.urgency = Set(urgency);
    }
    if let Some(budget_min) = input.budget_min {
        active.budget_min = Set(Some(budget_min));
    }
    if let Some(budget_max) = input.budget_max {
        active.budget_max = Set(Some(budget_max));
    }
    if let Some(preferred_date) = input.preferred_date {
        active.preferred_date = Set(Some(preferred_date));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(chrono::Utc::now());

    active.update(db).await
}

/// Delete a request together with its proposals and messages. One
/// transaction so a failure leaves the request intact.
pub async fn delete_request_cascade(
    db: &DatabaseConnection,
    request_id: Uuid,
) -> Result<(), DbErr> {
    let txn = db.begin().await?;

    messages::Entity::delete_many()
        .filter(messages::Column::ServiceRequestId.eq(request_id))
        .exec(&txn)
        .await?;

    proposals::Entity::delete_many()
        .filter(proposals::Column::ServiceRequestId.eq(request_id))
        .exec(&txn)
        .await?;

    requests::Entity::delete_by_id(request_id).exec(&txn).await?;

    txn.commit().await
}
