use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    ServiceRequestId,
    EvaluatorId,
    EvaluatedId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Each party may rate the other at most once per completed request.
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_request_parties_unique")
                    .table(Evaluations::Table)
                    .col(Evaluations::ServiceRequestId)
                    .col(Evaluations::EvaluatorId)
                    .col(Evaluations::EvaluatedId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_evaluations_request_parties_unique")
                    .table(Evaluations::Table)
                    .to_owned(),
            )
            .await
    }
}
