pub use sea_orm_migration::prelude::*;

mod m20260201_000001_create_users_table;
mod m20260201_000002_create_otps_table;
mod m20260201_000003_create_tags_table;
mod m20260201_000004_create_submissions_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000001_create_users_table::Migration),
            Box::new(m20260201_000002_create_otps_table::Migration),
            Box::new(m20260201_000003_create_tags_table::Migration),
            Box::new(m20260201_000004_create_submissions_tables::Migration),
        ]
    }
}
