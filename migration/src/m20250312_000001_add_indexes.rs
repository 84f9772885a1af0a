use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    ClientId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Proposals {
    Table,
    ServiceRequestId,
    ProviderId,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    EvaluatorId,
    EvaluatedId,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    ServiceRequestId,
}

#[derive(DeriveIden)]
enum ProviderServices {
    Table,
    ProviderId,
    CategoryId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on service_requests.client_id for fetching a client's requests
        manager
            .create_index(
                Index::create()
                    .name("idx_service_requests_client_id")
                    .table(ServiceRequests::Table)
                    .col(ServiceRequests::ClientId)
                    .to_owned(),
            )
            .await?;

        // Composite index for the open-requests feed (filter by status,
        // order by created_at)
        manager
            .create_index(
                Index::create()
                    .name("idx_service_requests_status_created_at")
                    .table(ServiceRequests::Table)
                    .col(ServiceRequests::Status)
                    .col(ServiceRequests::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index on proposals.service_request_id for listing a request's proposals
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_service_request_id")
                    .table(Proposals::Table)
                    .col(Proposals::ServiceRequestId)
                    .to_owned(),
            )
            .await?;

        // Index on proposals.provider_id for fetching a provider's proposals
        manager
            .create_index(
                Index::create()
                    .name("idx_proposals_provider_id")
                    .table(Proposals::Table)
                    .col(Proposals::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Index on evaluations.evaluated_id for the received-ratings listing
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_evaluated_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluatedId)
                    .to_owned(),
            )
            .await?;

        // Index on evaluations.evaluator_id for the given-ratings listing
        manager
            .create_index(
                Index::create()
                    .name("idx_evaluations_evaluator_id")
                    .table(Evaluations::Table)
                    .col(Evaluations::EvaluatorId)
                    .to_owned(),
            )
            .await?;

        // Index on messages.service_request_id for fetching a request's messages
        manager
            .create_index(
                Index::create()
                    .name("idx_messages_service_request_id")
                    .table(Messages::Table)
                    .col(Messages::ServiceRequestId)
                    .to_owned(),
            )
            .await?;

        // Index on provider_services.provider_id for a provider's catalog
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_services_provider_id")
                    .table(ProviderServices::Table)
                    .col(ProviderServices::ProviderId)
                    .to_owned(),
            )
            .await?;

        // Index on provider_services.category_id for category-filtered search
        manager
            .create_index(
                Index::create()
                    .name("idx_provider_services_category_id")
                    .table(ProviderServices::Table)
                    .col(ProviderServices::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_service_requests_client_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_service_requests_status_created_at")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(Index::drop().name("idx_proposals_service_request_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_proposals_provider_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_evaluations_evaluated_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_evaluations_evaluator_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_messages_service_request_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_provider_services_provider_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_provider_services_category_id").to_owned())
            .await?;

        Ok(())
    }
}
