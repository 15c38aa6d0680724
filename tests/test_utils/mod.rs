//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with migrations applied and
//! provides fixture helpers that go through the tenant-aware gateway,
//! so fixtures get stamped exactly like production rows.

use anyhow::Result;
use innkeep::gateway::Gateway;
use innkeep::models::{
    self,
    enums::{AccessLevel, RoomStatus},
};
use innkeep::services::TenantService;
use innkeep::services::tenant::TenantRequest;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveValue, ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite enforces foreign keys by default under sqlx; relax them so
    // fixtures can model rows whose references have gone missing.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Creates a tenant and returns its id.
pub async fn create_tenant(db: &DatabaseConnection, name: &str) -> Result<Uuid> {
    let tenant = TenantService::new(db)
        .create(TenantRequest {
            name: name.to_string(),
        })
        .await?;
    Ok(tenant.id)
}

/// Gateway scoped to one tenant.
pub fn gateway(db: &DatabaseConnection, tenant: Uuid) -> Gateway<'_> {
    Gateway::new(db, Some(tenant))
}

/// Privileged gateway with no tenant scope.
#[allow(dead_code)]
pub fn unscoped(db: &DatabaseConnection) -> Gateway<'_> {
    Gateway::new(db, None)
}

#[allow(dead_code)]
pub async fn seed_visit_reason(db: &DatabaseConnection, tenant: Uuid, name: &str) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::VisitReason>(models::visit_reason::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}

#[allow(dead_code)]
pub async fn seed_guest(
    db: &DatabaseConnection,
    tenant: Uuid,
    first_name: &str,
    last_name: &str,
) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::Guest>(models::guest::ActiveModel {
            first_name: ActiveValue::Set(first_name.to_string()),
            last_name: ActiveValue::Set(last_name.to_string()),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}

#[allow(dead_code)]
pub async fn seed_room_type(
    db: &DatabaseConnection,
    tenant: Uuid,
    name: &str,
    price: f64,
) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::RoomType>(models::room_type::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            price: ActiveValue::Set(price),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}

#[allow(dead_code)]
pub async fn seed_room(
    db: &DatabaseConnection,
    tenant: Uuid,
    number: &str,
    room_type_id: Uuid,
) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::Room>(models::room::ActiveModel {
            number: ActiveValue::Set(number.to_string()),
            room_type_id: ActiveValue::Set(room_type_id),
            status: ActiveValue::Set(RoomStatus::Available),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}

#[allow(dead_code)]
pub async fn seed_service(
    db: &DatabaseConnection,
    tenant: Uuid,
    name: &str,
    price: f64,
) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::Service>(models::service::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            price: ActiveValue::Set(price),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}

#[allow(dead_code)]
pub async fn seed_user(
    db: &DatabaseConnection,
    tenant: Uuid,
    name: &str,
    email: &str,
) -> Result<Uuid> {
    let model = gateway(db, tenant)
        .insert::<models::User>(models::user::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            access_level: ActiveValue::Set(AccessLevel::Staff),
            ..Default::default()
        })
        .await?;
    Ok(model.id)
}
