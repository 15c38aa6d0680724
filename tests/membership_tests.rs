//! Tests for the group membership engine shared by guest and room
//! associations.

use anyhow::Result;
use chrono::{Duration, Utc};
use innkeep::error::ServiceError;
use innkeep::services::reservation::CreateStayRequest;
use innkeep::services::{AddOutcome, GuestMemberships, RemoveOutcome, RoomMemberships, StayService};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_tenant, gateway, seed_guest, seed_room, seed_room_type, setup_test_db};

async fn seed_stay(db: &DatabaseConnection, tenant: Uuid) -> Result<Uuid> {
    let reason = test_utils::seed_visit_reason(db, tenant, "Leisure").await?;
    let holder = seed_guest(db, tenant, "Ana", "Ruiz").await?;
    let stay = StayService::new(gateway(db, tenant))
        .create(CreateStayRequest {
            visit_reason_id: reason,
            holder_id: holder,
            company_id: None,
            arrival_date: Utc::now().into(),
            departure_date: (Utc::now() + Duration::days(3)).into(),
            pax: 2,
            final_price: None,
            notes: None,
            guest_ids: vec![],
            room_ids: vec![],
        })
        .await?;
    Ok(stay.id)
}

#[tokio::test]
async fn adding_a_guest_twice_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let guest = seed_guest(&db, tenant, "Bo", "Li").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    assert_eq!(memberships.add(stay, guest).await?, AddOutcome::Added);
    assert_eq!(
        memberships.add(stay, guest).await?,
        AddOutcome::AlreadyMember
    );

    assert_eq!(memberships.members(stay).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn removing_a_non_member_reports_not_member() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let guest = seed_guest(&db, tenant, "Bo", "Li").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    assert_eq!(
        memberships.remove(stay, guest).await?,
        RemoveOutcome::NotMember
    );

    memberships.add(stay, guest).await?;
    assert_eq!(
        memberships.remove(stay, guest).await?,
        RemoveOutcome::Removed
    );
    assert_eq!(
        memberships.remove(stay, guest).await?,
        RemoveOutcome::NotMember
    );
    Ok(())
}

#[tokio::test]
async fn adding_a_missing_guest_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    let result = memberships.add(stay, Uuid::new_v4()).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn listing_members_of_an_unknown_stay_is_empty() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    assert!(memberships.members(Uuid::new_v4()).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn links_inherit_the_stays_tenant() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let guest = seed_guest(&db, tenant, "Bo", "Li").await?;

    // A privileged unscoped caller adds a member; the link row still
    // lands in the stay's tenant.
    let memberships = GuestMemberships::new(test_utils::unscoped(&db));
    assert_eq!(memberships.add(stay, guest).await?, AddOutcome::Added);

    let links = test_utils::unscoped(&db)
        .find_all::<innkeep::models::GroupGuest>()
        .await?;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tenant_id, tenant);

    // The scoped view sees the membership too.
    let scoped = GuestMemberships::new(gateway(&db, tenant));
    assert_eq!(scoped.member_ids(stay).await?, vec![guest]);
    Ok(())
}

#[tokio::test]
async fn adding_to_a_missing_stay_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let guest = seed_guest(&db, tenant, "Bo", "Li").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    let result = memberships.add(Uuid::new_v4(), guest).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn bulk_add_skips_missing_guests() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let guest_a = seed_guest(&db, tenant, "Bo", "Li").await?;
    let guest_b = seed_guest(&db, tenant, "Cy", "Nguyen").await?;
    let ghost = Uuid::new_v4();

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    memberships.add(stay, guest_a).await?;

    let outcome = memberships.add_many(stay, &[guest_a, guest_b, ghost]).await?;
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.already_members, 1);
    assert_eq!(outcome.missing, vec![ghost]);

    assert_eq!(memberships.members(stay).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn sync_converges_to_desired_set() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let a = seed_guest(&db, tenant, "Ana", "Ruiz").await?;
    let b = seed_guest(&db, tenant, "Bo", "Li").await?;
    let c = seed_guest(&db, tenant, "Cy", "Nguyen").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    memberships.add_many(stay, &[a, b]).await?;

    let outcome = memberships.sync(stay, &[b, c]).await?;
    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.kept, 1);
    assert!(outcome.missing.is_empty());

    let mut ids = memberships.member_ids(stay).await?;
    ids.sort();
    let mut expected = vec![b, c];
    expected.sort();
    assert_eq!(ids, expected);
    Ok(())
}

#[tokio::test]
async fn sync_with_empty_set_clears_the_group() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let a = seed_guest(&db, tenant, "Ana", "Ruiz").await?;
    let b = seed_guest(&db, tenant, "Bo", "Li").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    memberships.add_many(stay, &[a, b]).await?;

    let outcome = memberships.sync(stay, &[]).await?;
    assert_eq!(outcome.removed, 2);
    assert!(memberships.members(stay).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn sync_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let a = seed_guest(&db, tenant, "Ana", "Ruiz").await?;
    let b = seed_guest(&db, tenant, "Bo", "Li").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant));
    memberships.sync(stay, &[a, b]).await?;

    let again = memberships.sync(stay, &[a, b]).await?;
    assert_eq!(again.added, 0);
    assert_eq!(again.removed, 0);
    assert_eq!(again.kept, 2);
    Ok(())
}

#[tokio::test]
async fn guests_from_another_tenant_are_invisible() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant_a = create_tenant(&db, "Hotel A").await?;
    let tenant_b = create_tenant(&db, "Hotel B").await?;
    let stay = seed_stay(&db, tenant_a).await?;
    let foreign_guest = seed_guest(&db, tenant_b, "Mallory", "Jones").await?;

    let memberships = GuestMemberships::new(gateway(&db, tenant_a));
    let result = memberships.add(stay, foreign_guest).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
    Ok(())
}

#[tokio::test]
async fn room_membership_behaves_like_guest_membership() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;
    let room_type = seed_room_type(&db, tenant, "Double", 80.0).await?;
    let room = seed_room(&db, tenant, "101", room_type).await?;

    let memberships = RoomMemberships::new(gateway(&db, tenant));
    assert_eq!(memberships.add(stay, room).await?, AddOutcome::Added);
    assert_eq!(memberships.add(stay, room).await?, AddOutcome::AlreadyMember);

    let members = memberships.members(stay).await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].number, "101");

    assert_eq!(memberships.remove(stay, room).await?, RemoveOutcome::Removed);
    assert!(memberships.members(stay).await?.is_empty());
    Ok(())
}
