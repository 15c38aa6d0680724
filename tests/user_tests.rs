//! Tests for staff user administration.

use anyhow::Result;
use chrono::{Duration, Utc};
use innkeep::error::ServiceError;
use innkeep::models::enums::AccessLevel;
use innkeep::services::catalog::IssueTicketRequest;
use innkeep::services::reservation::CreateStayRequest;
use innkeep::services::user::UserRequest;
use innkeep::services::{CatalogService, StayService, UserService};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_tenant, gateway, seed_guest, seed_service, seed_visit_reason, setup_test_db};

fn request(name: &str, email: &str) -> UserRequest {
    UserRequest {
        name: name.to_string(),
        email: email.to_string(),
        access_level: None,
    }
}

#[tokio::test]
async fn users_default_to_staff_access() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;

    let user = UserService::new(gateway(&db, tenant))
        .create(request("Front Desk", "desk@example.com"))
        .await?;

    assert_eq!(user.access_level, AccessLevel::Staff);
    assert_eq!(user.tenant_id, tenant);
    Ok(())
}

#[tokio::test]
async fn emails_unique_per_tenant_not_globally() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_tenant(&db, "Hotel A").await?;
    let tenant_b = create_tenant(&db, "Hotel B").await?;

    UserService::new(gateway(&db, tenant_a))
        .create(request("Front Desk", "desk@example.com"))
        .await?;
    UserService::new(gateway(&db, tenant_b))
        .create(request("Front Desk", "desk@example.com"))
        .await?;

    let duplicate = UserService::new(gateway(&db, tenant_a))
        .create(request("Night Desk", "desk@example.com"))
        .await;
    assert!(matches!(duplicate, Err(ServiceError::Conflict(_))));
    Ok(())
}

#[tokio::test]
async fn update_keeps_access_level_when_absent() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let service = UserService::new(gateway(&db, tenant));

    let user = service
        .create(UserRequest {
            name: "Manager".to_string(),
            email: "manager@example.com".to_string(),
            access_level: Some(AccessLevel::Manager),
        })
        .await?;

    let updated = service
        .update(user.id, request("Shift Manager", "manager@example.com"))
        .await?;
    assert_eq!(updated.name, "Shift Manager");
    assert_eq!(updated.access_level, AccessLevel::Manager);
    Ok(())
}

#[tokio::test]
async fn deletion_is_blocked_while_tickets_name_the_user() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let users = UserService::new(gateway(&db, tenant));
    let catalog = CatalogService::new(gateway(&db, tenant));

    let clerk = users
        .create(request("Front Desk", "desk@example.com"))
        .await?;

    let reason = seed_visit_reason(&db, tenant, "Leisure").await?;
    let holder = seed_guest(&db, tenant, "Ana", "Ruiz").await?;
    let stay = StayService::new(gateway(&db, tenant))
        .create(CreateStayRequest {
            visit_reason_id: reason,
            holder_id: holder,
            company_id: None,
            arrival_date: Utc::now().into(),
            departure_date: (Utc::now() + Duration::days(2)).into(),
            pax: 1,
            final_price: None,
            notes: None,
            guest_ids: vec![],
            room_ids: vec![],
        })
        .await?;
    let spa = seed_service(&db, tenant, "Spa", 45.0).await?;
    let ticket = catalog
        .issue_ticket(IssueTicketRequest {
            stay_id: stay.id,
            service_id: spa,
            user_id: clerk.id,
        })
        .await?;

    let result = users.delete(clerk.id).await;
    assert!(matches!(result, Err(ServiceError::InUse { .. })));

    catalog.void_ticket(ticket.id).await?;
    users.delete(clerk.id).await?;
    assert!(matches!(
        users.get(clerk.id).await,
        Err(ServiceError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn users_are_invisible_across_tenants() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_tenant(&db, "Hotel A").await?;
    let tenant_b = create_tenant(&db, "Hotel B").await?;

    let user = UserService::new(gateway(&db, tenant_a))
        .create(request("Front Desk", "desk@example.com"))
        .await?;

    let result = UserService::new(gateway(&db, tenant_b)).get(user.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    Ok(())
}
