use sea_orm::*;
use uuid::Uuid;

use crate::models::categories::{self, CreateCategory};

/// Fetch all active categories.
pub async fn get_active_categories(
    db: &DatabaseConnection,
) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::IsActive.eq(true))
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await
}

/// Fetch a single category by ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

/// Fetch a category by its unique name.
pub async fn find_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(db)
        .await
}

/// Insert a new category.
pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, DbErr> {
    let new_category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        icon: Set(input.icon),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
    };

    new_category.insert(db).await
}
