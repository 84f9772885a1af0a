use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Proposals {
    Table,
    ServiceRequestId,
    ProviderId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One proposal per provider per request, enforced at the database
        // level so concurrent submissions cannot slip past the handler check.
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_request_provider_unique")
                    .table(Proposals::Table)
                    .col(Proposals::ServiceRequestId)
                    .col(Proposals::ProviderId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_proposals_request_provider_unique")
                    .table(Proposals::Table)
                    .to_owned(),
            )
            .await
    }
}
