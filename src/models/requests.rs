use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client-declared urgency of a service request. Advisory only; it never
/// gates a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "normal")]
    Normal,
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "urgent")]
    Urgent,
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Normal
    }
}

/// Lifecycle state of a service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl RequestStatus {
    /// Whether moving from `self` to `next` follows the lifecycle graph.
    /// `completed` and `cancelled` are terminal; `open` can only progress
    /// through acceptance or be cancelled outright.
    pub fn can_transition_to(&self, next: &RequestStatus) -> bool {
        matches!(
            (self, next),
            (RequestStatus::Open, RequestStatus::InProgress)
                | (RequestStatus::Open, RequestStatus::Cancelled)
                | (RequestStatus::InProgress, RequestStatus::Completed)
                | (RequestStatus::InProgress, RequestStatus::Cancelled)
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub urgency: Urgency,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub preferred_date: Option<DateTimeUtc>,
    pub status: RequestStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub images: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::proposals::Entity")]
    Proposals,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::proposals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Proposals.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/requests.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequest {
    pub category_id: Uuid,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub urgency: Urgency,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub preferred_date: Option<DateTimeUtc>,
    pub images: Option<String>,
}

/// Typed patch for PUT /api/requests/{id}. Only these fields are writable
/// after creation; location and category are fixed once posted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<Urgency>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub preferred_date: Option<DateTimeUtc>,
    pub status: Option<RequestStatus>,
}

/// Compact request block embedded in a provider's proposal listing.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub city: String,
    pub state: String,
    pub status: RequestStatus,
}

impl From<&Model> for RequestSummary {
    fn from(m: &Model) -> Self {
        Self {
            id: m.id,
            title: m.title.clone(),
            description: m.description.clone(),
            city: m.city.clone(),
            state: m.state.clone(),
            status: m.status.clone(),
        }
    }
}

/// Full request payload for GET /api/requests/{id}, with the client and
/// category blocks joined in.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: Model,
    pub client: Option<super::users::ClientSummary>,
    pub category: Option<super::categories::Model>,
}
