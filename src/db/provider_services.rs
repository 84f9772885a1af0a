use sea_orm::*;
use uuid::Uuid;

use crate::models::provider_services::{self, CreateProviderService};

/// Insert a new provider service offering.
pub async fn insert_provider_service(
    db: &DatabaseConnection,
    input: CreateProviderService,
    provider_id: Uuid,
) -> Result<provider_services::Model, DbErr> {
    let new_service = provider_services::ActiveModel {
        id: Set(Uuid::new_v4()),
        provider_id: Set(provider_id),
        category_id: Set(input.category_id),
        description: Set(input.description),
        base_price: Set(input.base_price),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
    };

    new_service.insert(db).await
}

/// Fetch a provider's active service offerings.
pub async fn get_by_provider(
    db: &DatabaseConnection,
    provider_id: Uuid,
) -> Result<Vec<provider_services::Model>, DbErr> {
    provider_services::Entity::find()
        .filter(provider_services::Column::ProviderId.eq(provider_id))
        .filter(provider_services::Column::IsActive.eq(true))
        .all(db)
        .await
}

/// Whether the provider already offers this category.
pub async fn exists_for_provider_and_category(
    db: &DatabaseConnection,
    provider_id: Uuid,
    category_id: Uuid,
) -> Result<bool, DbErr> {
    let existing = provider_services::Entity::find()
        .filter(provider_services::Column::ProviderId.eq(provider_id))
        .filter(provider_services::Column::CategoryId.eq(category_id))
        .one(db)
        .await?;

    Ok(existing.is_some())
}

/// IDs of providers actively offering a category, for the search filter.
pub async fn get_provider_ids_by_category(
    db: &DatabaseConnection,
    category_id: Uuid,
) -> Result<Vec<Uuid>, DbErr> {
    let rows = provider_services::Entity::find()
        .filter(provider_services::Column::CategoryId.eq(category_id))
        .filter(provider_services::Column::IsActive.eq(true))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|s| s.provider_id).collect())
}
