use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a proposal. `cancelled` is reserved for a provider
/// withdrawing a pending proposal; no route sets it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "proposals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_request_id: Uuid,
    pub provider_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub estimated_duration: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub materials_included: bool,
    pub availability: Option<String>,
    pub status: ProposalStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::requests::Entity",
        from = "Column::ServiceRequestId",
        to = "super::requests::Column::Id"
    )]
    Request,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProviderId",
        to = "super::users::Column::Id"
    )]
    Provider,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/proposals.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProposal {
    pub service_request_id: Uuid,
    pub price: f64,
    pub estimated_duration: Option<String>,
    pub description: Option<String>,
    pub availability: Option<String>,
    #[serde(default)]
    pub materials_included: bool,
}

/// Proposal with its provider's public profile, returned to the request
/// owner when comparing bids.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalWithProvider {
    #[serde(flatten)]
    pub proposal: Model,
    pub provider: Option<super::users::ProviderProfile>,
}

/// Proposal with the request it targets, returned to the provider who
/// sent it.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalWithRequest {
    #[serde(flatten)]
    pub proposal: Model,
    pub service_request: Option<super::requests::RequestSummary>,
    pub client: Option<super::users::ClientRating>,
}
