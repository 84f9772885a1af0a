use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// SeaORM entity for the `evaluations` table. One row per (request,
/// evaluator, evaluated) triple; rows are immutable once written.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_request_id: Uuid,
    pub evaluator_id: Uuid,
    pub evaluated_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub punctuality: Option<i32>,
    pub quality: Option<i32>,
    pub communication: Option<i32>,
    pub created_at: DateTimeUtc,
}

// Two foreign keys into users make Related<users::Entity> ambiguous, so
// lookups of the evaluator/evaluated rows go through explicit queries.
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
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatedId",
        to = "super::users::Column::Id"
    )]
    Evaluated,
}

impl Related<super::requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Request.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for POST /api/evaluations.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvaluation {
    pub service_request_id: Uuid,
    pub evaluated_id: Uuid,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub comment: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Punctuality must be between 1 and 5"))]
    pub punctuality: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Quality must be between 1 and 5"))]
    pub quality: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Communication must be between 1 and 5"))]
    pub communication: Option<i32>,
}

/// Evaluation with who wrote it, shown on a user's public rating page.
/// Deserialize is needed so the whole block can round-trip through the
/// Redis cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationWithEvaluator {
    #[serde(flatten)]
    pub evaluation: Model,
    pub evaluator: Option<super::users::PartySummary>,
}

/// Evaluation with who received it, shown under "given" in the caller's
/// own listing.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationWithEvaluated {
    #[serde(flatten)]
    pub evaluation: Model,
    pub evaluated: Option<super::users::PartySummary>,
}

/// Evaluation with both parties, shown on the per-request listing.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationWithParties {
    #[serde(flatten)]
    pub evaluation: Model,
    pub evaluator: Option<super::users::PartySummary>,
    pub evaluated: Option<super::users::PartySummary>,
}

/// Payload for GET /api/evaluations/user/{id}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvaluationsResponse {
    pub evaluations: Vec<EvaluationWithEvaluator>,
    pub average_rating: f64,
    pub total_evaluations: u64,
}

/// Payload for GET /api/evaluations/my-evaluations.
#[derive(Debug, Clone, Serialize)]
pub struct MyEvaluationsResponse {
    pub received: Vec<EvaluationWithEvaluator>,
    pub given: Vec<EvaluationWithEvaluated>,
}
