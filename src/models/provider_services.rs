use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `provider_services` table: the categories a
/// provider advertises, with an optional base price.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "provider_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub provider_id: Uuid,
    pub category_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub base_price: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProviderId",
        to = "super::users::Column::Id"
    )]
    Provider,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/services/provider-services.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProviderService {
    pub category_id: Uuid,
    pub description: Option<String>,
    pub base_price: Option<f64>,
}

/// Query string for GET /api/services/search. Every filter is optional;
/// an empty query lists active, verified providers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSearchQuery {
    pub category_id: Option<Uuid>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub keyword: Option<String>,
    pub min_rating: Option<f64>,
}
