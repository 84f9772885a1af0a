use sea_orm::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::db::users as users_db;
use crate::models::evaluations::{
    self, CreateEvaluation, EvaluationWithEvaluated, EvaluationWithEvaluator,
    EvaluationWithParties,
};
use crate::models::users;

/// Arithmetic mean of ratings, rounded to two decimals. Empty input means
/// no evaluations yet and yields 0.0.
pub fn mean_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i32 = ratings.iter().sum();
    let mean = f64::from(sum) / ratings.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Whether this evaluator already rated this user for this request.
pub async fn evaluation_exists(
    db: &DatabaseConnection,
    request_id: Uuid,
    evaluator_id: Uuid,
    evaluated_id: Uuid,
) -> Result<bool, DbErr> {
    let existing = evaluations::Entity::find()
        .filter(evaluations::Column::ServiceRequestId.eq(request_id))
        .filter(evaluations::Column::EvaluatorId.eq(evaluator_id))
        .filter(evaluations::Column::EvaluatedId.eq(evaluated_id))
        .one(db)
        .await?;

    Ok(existing.is_some())
}

/// Insert an evaluation and refresh the evaluated user's aggregates in the
/// same transaction. The new rating is part of the recomputed mean, and
/// `total_services` follows the received-evaluation count for providers.
pub async fn insert_evaluation(
    db: &DatabaseConnection,
    input: CreateEvaluation,
    evaluator_id: Uuid,
    evaluated: users::Model,
) -> Result<evaluations::Model, DbErr> {
    let txn = db.begin().await?;

    let new_evaluation = evaluations::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_request_id: Set(input.service_request_id),
        evaluator_id: Set(evaluator_id),
        evaluated_id: Set(input.evaluated_id),
        rating: Set(input.rating),
        comment: Set(input.comment),
        punctuality: Set(input.punctuality),
        quality: Set(input.quality),
        communication: Set(input.communication),
        created_at: Set(chrono::Utc::now()),
    };
    let inserted = new_evaluation.insert(&txn).await?;

    let ratings: Vec<i32> = evaluations::Entity::find()
        .filter(evaluations::Column::EvaluatedId.eq(inserted.evaluated_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|e| e.rating)
        .collect();

    let average = mean_rating(&ratings);
    let total = ratings.len() as i32;
    users_db::apply_rating(&txn, evaluated, average, total).await?;

    txn.commit().await?;

    Ok(inserted)
}

/// Fetch the evaluations a user received, newest first, with each
/// evaluator attached.
pub async fn get_received_with_evaluator(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<EvaluationWithEvaluator>, DbErr> {
    let rows = evaluations::Entity::find()
        .filter(evaluations::Column::EvaluatedId.eq(user_id))
        .order_by_desc(evaluations::Column::CreatedAt)
        .all(db)
        .await?;

    let parties = fetch_parties(db, rows.iter().map(|e| e.evaluator_id).collect()).await?;

    Ok(rows
        .into_iter()
        .map(|evaluation| {
            let evaluator = parties
                .get(&evaluation.evaluator_id)
                .map(users::PartySummary::from);
            EvaluationWithEvaluator { evaluation, evaluator }
        })
        .collect())
}

/// Fetch the evaluations a user wrote, newest first, with each evaluated
/// party attached.
pub async fn get_given_with_evaluated(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<EvaluationWithEvaluated>, DbErr> {
    let rows = evaluations::Entity::find()
        .filter(evaluations::Column::EvaluatorId.eq(user_id))
        .order_by_desc(evaluations::Column::CreatedAt)
        .all(db)
        .await?;

    let parties = fetch_parties(db, rows.iter().map(|e| e.evaluated_id).collect()).await?;

    Ok(rows
        .into_iter()
        .map(|evaluation| {
            let evaluated = parties
                .get(&evaluation.evaluated_id)
                .map(users::PartySummary::from);
            EvaluationWithEvaluated { evaluation, evaluated }
        })
        .collect())
}

/// Fetch the evaluations on a request, newest first, with both parties
/// attached.
pub async fn get_by_request_with_parties(
    db: &DatabaseConnection,
    request_id: Uuid,
) -> Result<Vec<EvaluationWithParties>, DbErr> {
    let rows = evaluations::Entity::find()
        .filter(evaluations::Column::ServiceRequestId.eq(request_id))
        .order_by_desc(evaluations::Column::CreatedAt)
        .all(db)
        .await?;

    let ids: Vec<Uuid> = rows
        .iter()
        .flat_map(|e| [e.evaluator_id, e.evaluated_id])
        .collect();
    let parties = fetch_parties(db, ids).await?;

    Ok(rows
        .into_iter()
        .map(|evaluation| {
            let evaluator = parties
                .get(&evaluation.evaluator_id)
                .map(users::PartySummary::from);
            let evaluated = parties
                .get(&evaluation.evaluated_id)
                .map(users::PartySummary::from);
            EvaluationWithParties {
                evaluation,
                evaluator,
                evaluated,
            }
        })
        .collect())
}

/// Batch-fetch users referenced by a set of evaluations into an id map.
async fn fetch_parties(
    db: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, users::Model>, DbErr> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = users::Entity::find()
        .filter(users::Column::Id.is_in(ids))
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|u| (u.id, u)).collect())
}
