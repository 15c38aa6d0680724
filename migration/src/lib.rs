//! Database migrations for the Innkeep API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2025_06_01_000001_create_tenants;
mod m2025_06_01_000002_create_users;
mod m2025_06_01_000003_create_guest_lookups;
mod m2025_06_01_000004_create_guests;
mod m2025_06_01_000005_create_room_types;
mod m2025_06_01_000006_create_rooms;
mod m2025_06_01_000007_create_visit_reasons;
mod m2025_06_01_000008_create_stays;
mod m2025_06_01_000009_create_group_guests;
mod m2025_06_01_000010_create_group_rooms;
mod m2025_06_01_000011_create_services;
mod m2025_06_01_000012_create_service_tickets;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2025_06_01_000001_create_tenants::Migration),
            Box::new(m2025_06_01_000002_create_users::Migration),
            Box::new(m2025_06_01_000003_create_guest_lookups::Migration),
            Box::new(m2025_06_01_000004_create_guests::Migration),
            Box::new(m2025_06_01_000005_create_room_types::Migration),
            Box::new(m2025_06_01_000006_create_rooms::Migration),
            Box::new(m2025_06_01_000007_create_visit_reasons::Migration),
            Box::new(m2025_06_01_000008_create_stays::Migration),
            Box::new(m2025_06_01_000009_create_group_guests::Migration),
            Box::new(m2025_06_01_000010_create_group_rooms::Migration),
            Box::new(m2025_06_01_000011_create_services::Migration),
            Box::new(m2025_06_01_000012_create_service_tickets::Migration),
        ]
    }
}
