use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `service_requests` table and its columns.
#[derive(DeriveIden)]
enum ServiceRequests {
    Table,
    Id,
    ClientId,
    CategoryId,
    Title,
    Description,
    Address,
    City,
    State,
    ZipCode,
    Latitude,
    Longitude,
    Urgency,
    BudgetMin,
    BudgetMax,
    PreferredDate,
    Status,
    Images,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ServiceCategories {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceRequests::ClientId).uuid().not_null())
                    .col(ColumnDef::new(ServiceRequests::CategoryId).uuid().not_null())
                    .col(ColumnDef::new(ServiceRequests::Title).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::Description).text().not_null())
                    .col(ColumnDef::new(ServiceRequests::Address).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::City).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::State).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::ZipCode).string().not_null())
                    .col(ColumnDef::new(ServiceRequests::Latitude).double().null())
                    .col(ColumnDef::new(ServiceRequests::Longitude).double().null())
                    .col(
                        ColumnDef::new(ServiceRequests::Urgency)
                            .string()
                            .not_null()
                            .default("normal"),
                    )
                    .col(ColumnDef::new(ServiceRequests::BudgetMin).double().null())
                    .col(ColumnDef::new(ServiceRequests::BudgetMax).double().null())
                    .col(
                        ColumnDef::new(ServiceRequests::PreferredDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::Status)
                            .string()
                            .not_null()
                            .default("open"),
                    )
                    .col(ColumnDef::new(ServiceRequests::Images).text().null())
                    .col(
                        ColumnDef::new(ServiceRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_requests_client_id")
                            .from(ServiceRequests::Table, ServiceRequests::ClientId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_requests_category_id")
                            .from(ServiceRequests::Table, ServiceRequests::CategoryId)
                            .to(ServiceCategories::Table, ServiceCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceRequests::Table).to_owned())
            .await
    }
}
