use sea_orm_migration::prelude::*;

mod m20251201_000001_create_accounts;
mod m20251201_000002_create_profiles;
mod m20251201_000003_create_members;
mod m20251201_000004_create_attendance;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251201_000001_create_accounts::Migration),
            Box::new(m20251201_000002_create_profiles::Migration),
            Box::new(m20251201_000003_create_members::Migration),
            Box::new(m20251201_000004_create_attendance::Migration),
        ]
    }
}
