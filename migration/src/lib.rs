pub use sea_orm_migration::prelude::*;

mod m20260801_000001_address;
mod m20260801_000002_subscriber;
mod m20260801_000003_equipment_type;
mod m20260801_000004_equipment;
mod m20260801_000005_equipment_status;
mod m20260801_000006_agreement;
mod m20260801_000007_installed_equipment;
mod m20260801_000008_organization;
mod m20260801_000009_verification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_address::Migration),
            Box::new(m20260801_000002_subscriber::Migration),
            Box::new(m20260801_000003_equipment_type::Migration),
            Box::new(m20260801_000004_equipment::Migration),
            Box::new(m20260801_000005_equipment_status::Migration),
            Box::new(m20260801_000006_agreement::Migration),
            Box::new(m20260801_000007_installed_equipment::Migration),
            Box::new(m20260801_000008_organization::Migration),
            Box::new(m20260801_000009_verification::Migration),
        ]
    }
}
