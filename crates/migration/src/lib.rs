//! Migrator registering one table per collection, indexes applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_gym_sessions;
mod m20240301_000003_create_reservations;
mod m20240301_000004_create_physical_progress;
mod m20240301_000005_create_reports;
mod m20240301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_gym_sessions::Migration),
            Box::new(m20240301_000003_create_reservations::Migration),
            Box::new(m20240301_000004_create_physical_progress::Migration),
            Box::new(m20240301_000005_create_reports::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000006_add_indexes::Migration),
        ]
    }
}
