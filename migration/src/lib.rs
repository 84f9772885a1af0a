pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users_table;
mod m20250301_000002_create_service_categories_table;
mod m20250301_000003_create_service_requests_table;
mod m20250301_000004_create_proposals_table;
mod m20250305_000001_create_evaluations_table;
mod m20250305_000002_create_messages_table;
mod m20250308_000001_create_provider_services_table;
mod m20250310_000001_add_unique_proposal_per_provider;
mod m20250310_000002_add_unique_evaluation_per_pair;
mod m20250312_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users_table::Migration),
            Box::new(m20250301_000002_create_service_categories_table::Migration),
            Box::new(m20250301_000003_create_service_requests_table::Migration),
            Box::new(m20250301_000004_create_proposals_table::Migration),
            Box::new(m20250305_000001_create_evaluations_table::Migration),
            Box::new(m20250305_000002_create_messages_table::Migration),
            Box::new(m20250308_000001_create_provider_services_table::Migration),
            Box::new(m20250310_000001_add_unique_proposal_per_provider::Migration),
            Box::new(m20250310_000002_add_unique_evaluation_per_pair::Migration),
            Box::new(m20250312_000001_add_indexes::Migration),
        ]
    }
}
