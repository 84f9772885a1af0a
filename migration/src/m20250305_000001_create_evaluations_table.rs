use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    ServiceRequestId,
    EvaluatorId,
    EvaluatedId,
    Rating,
    Comment,
    Punctuality,
    Quality,
    Communication,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ServiceRequestId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::EvaluatorId).uuid().not_null())
                    .col(ColumnDef::new(Evaluations::EvaluatedId).uuid().not_null())
                    .col(ColumnDef::new(Evaluations::Rating).integer().not_null())
                    .col(ColumnDef::new(Evaluations::Comment).text().null())
                    .col(ColumnDef::new(Evaluations::Punctuality).integer().null())
                    .col(ColumnDef::new(Evaluations::Quality).integer().null())
                    .col(ColumnDef::new(Evaluations::Communication).integer().null())
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_service_request_id")
                            .from(Evaluations::Table, Evaluations::ServiceRequestId)
                            .to(ServiceRequests::Table, ServiceRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_evaluator_id")
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_evaluations_evaluated_id")
                            .from(Evaluations::Table, Evaluations::EvaluatedId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await
    }
}
