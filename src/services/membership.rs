//! # Group Membership
//!
//! One engine for associating guests and rooms with a stay. Both
//! associations behave identically: adds are idempotent, removes report
//! whether anything was removed, and bulk sync converges the stored set
//! to a desired set.
//!
//! The unique index on (stay, member) closes the check-then-insert race:
//! a concurrent duplicate insert surfaces as a unique violation and is
//! reported as already-member, never as a failure.

use sea_orm::{
    ActiveModelBehavior, ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, PrimaryKeyTrait,
    QueryFilter,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceError, is_unique_violation};
use crate::gateway::{Gateway, GatewayError, TenantScoped};
use crate::models::{self, group_guest, group_room};

/// Join entity linking a stay to some member entity.
pub trait StayLink: TenantScoped {
    /// The entity on the other end of the link.
    type Target: TenantScoped;

    /// Display name of the target, used in not-found errors.
    const TARGET_NAME: &'static str;

    fn stay_column() -> Self::Column;
    fn target_column() -> Self::Column;
    fn target_id_column() -> <Self::Target as EntityTrait>::Column;
    fn target_of(model: &Self::Model) -> Uuid;

    /// Builds a link row. The tenant is inherited from the stay, not
    /// from the caller's scope, so privileged unscoped adds still land
    /// in the right tenant.
    fn new_link(tenant_id: Uuid, stay_id: Uuid, target_id: Uuid) -> Self::ActiveModel;
}

impl StayLink for group_guest::Entity {
    type Target = models::Guest;

    const TARGET_NAME: &'static str = "Guest";

    fn stay_column() -> Self::Column {
        group_guest::Column::StayId
    }

    fn target_column() -> Self::Column {
        group_guest::Column::GuestId
    }

    fn target_id_column() -> <Self::Target as EntityTrait>::Column {
        models::guest::Column::Id
    }

    fn target_of(model: &Self::Model) -> Uuid {
        model.guest_id
    }

    fn new_link(tenant_id: Uuid, stay_id: Uuid, target_id: Uuid) -> Self::ActiveModel {
        group_guest::ActiveModel {
            tenant_id: ActiveValue::Set(tenant_id),
            stay_id: ActiveValue::Set(stay_id),
            guest_id: ActiveValue::Set(target_id),
            ..Default::default()
        }
    }
}

impl StayLink for group_room::Entity {
    type Target = models::Room;

    const TARGET_NAME: &'static str = "Room";

    fn stay_column() -> Self::Column {
        group_room::Column::StayId
    }

    fn target_column() -> Self::Column {
        group_room::Column::RoomId
    }

    fn target_id_column() -> <Self::Target as EntityTrait>::Column {
        models::room::Column::Id
    }

    fn target_of(model: &Self::Model) -> Uuid {
        model.room_id
    }

    fn new_link(tenant_id: Uuid, stay_id: Uuid, target_id: Uuid) -> Self::ActiveModel {
        group_room::ActiveModel {
            tenant_id: ActiveValue::Set(tenant_id),
            stay_id: ActiveValue::Set(stay_id),
            room_id: ActiveValue::Set(target_id),
            ..Default::default()
        }
    }
}

/// Result of a single add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AddOutcome {
    Added,
    AlreadyMember,
}

/// Result of a single remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RemoveOutcome {
    Removed,
    NotMember,
}

/// Result of a bulk add. Missing targets are skipped, not fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOutcome {
    pub added: usize,
    pub already_members: usize,
    pub missing: Vec<Uuid>,
}

/// Result of converging the stored member set to a desired set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub added: usize,
    pub removed: usize,
    pub kept: usize,
    pub missing: Vec<Uuid>,
}

/// Membership operations for one link type within one tenant scope.
pub struct Memberships<'a, L: StayLink> {
    gateway: Gateway<'a>,
    _link: std::marker::PhantomData<L>,
}

impl<'a, L> Memberships<'a, L>
where
    L: StayLink,
    L::Model: IntoActiveModel<L::ActiveModel>,
    L::ActiveModel: ActiveModelBehavior + Send,
    <L::Target as EntityTrait>::Model: IntoActiveModel<<L::Target as EntityTrait>::ActiveModel>,
    <<L::Target as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self {
            gateway,
            _link: std::marker::PhantomData,
        }
    }

    /// Associates a member with a stay. Adding an existing member is a
    /// success reporting [`AddOutcome::AlreadyMember`].
    pub async fn add(&self, stay_id: Uuid, target_id: Uuid) -> Result<AddOutcome, ServiceError> {
        let stay = self.require_stay(stay_id).await?;
        if !self.gateway.exists::<L::Target>(target_id).await? {
            return Err(ServiceError::not_found(L::TARGET_NAME));
        }

        if self.link_exists(stay_id, target_id).await? {
            return Ok(AddOutcome::AlreadyMember);
        }

        match self
            .gateway
            .insert::<L>(L::new_link(stay.tenant_id, stay_id, target_id))
            .await
        {
            Ok(_) => Ok(AddOutcome::Added),
            Err(GatewayError::Database(err)) if is_unique_violation(&err) => {
                Ok(AddOutcome::AlreadyMember)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Dissociates a member from a stay.
    pub async fn remove(
        &self,
        stay_id: Uuid,
        target_id: Uuid,
    ) -> Result<RemoveOutcome, ServiceError> {
        self.require_stay(stay_id).await?;

        let result = self
            .gateway
            .scoped_delete::<L>()
            .filter(L::stay_column().eq(stay_id))
            .filter(L::target_column().eq(target_id))
            .exec(self.gateway.db())
            .await?;

        if result.rows_affected > 0 {
            Ok(RemoveOutcome::Removed)
        } else {
            Ok(RemoveOutcome::NotMember)
        }
    }

    /// Lists the members associated with a stay. A stay with no links,
    /// including one that does not exist in scope, yields an empty list
    /// rather than an error.
    pub async fn members(
        &self,
        stay_id: Uuid,
    ) -> Result<Vec<<L::Target as EntityTrait>::Model>, ServiceError> {
        let ids = self.member_ids(stay_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .gateway
            .scoped::<L::Target>()
            .filter(L::target_id_column().is_in(ids))
            .all(self.gateway.db())
            .await?)
    }

    /// Associates many members at once. Targets that do not exist in the
    /// current scope are skipped and reported, not fatal.
    pub async fn add_many(
        &self,
        stay_id: Uuid,
        target_ids: &[Uuid],
    ) -> Result<BulkOutcome, ServiceError> {
        let stay = self.require_stay(stay_id).await?;

        let mut outcome = BulkOutcome::default();
        for &target_id in target_ids {
            if !self.gateway.exists::<L::Target>(target_id).await? {
                outcome.missing.push(target_id);
                continue;
            }
            if self.link_exists(stay_id, target_id).await? {
                outcome.already_members += 1;
                continue;
            }
            match self
                .gateway
                .insert::<L>(L::new_link(stay.tenant_id, stay_id, target_id))
                .await
            {
                Ok(_) => outcome.added += 1,
                Err(GatewayError::Database(err)) if is_unique_violation(&err) => {
                    outcome.already_members += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(outcome)
    }

    /// Converges the stored member set to `desired`: members not in the
    /// set are removed, absent ones added, present ones left alone.
    pub async fn sync(
        &self,
        stay_id: Uuid,
        desired: &[Uuid],
    ) -> Result<SyncOutcome, ServiceError> {
        let stay = self.require_stay(stay_id).await?;

        let current = self.member_ids(stay_id).await?;
        let mut outcome = SyncOutcome::default();

        let extras: Vec<Uuid> = current
            .iter()
            .copied()
            .filter(|id| !desired.contains(id))
            .collect();
        if !extras.is_empty() {
            let result = self
                .gateway
                .scoped_delete::<L>()
                .filter(L::stay_column().eq(stay_id))
                .filter(L::target_column().is_in(extras))
                .exec(self.gateway.db())
                .await?;
            outcome.removed = result.rows_affected as usize;
        }

        for &target_id in desired {
            if current.contains(&target_id) {
                outcome.kept += 1;
                continue;
            }
            if !self.gateway.exists::<L::Target>(target_id).await? {
                outcome.missing.push(target_id);
                continue;
            }
            match self
                .gateway
                .insert::<L>(L::new_link(stay.tenant_id, stay_id, target_id))
                .await
            {
                Ok(_) => outcome.added += 1,
                Err(GatewayError::Database(err)) if is_unique_violation(&err) => {
                    outcome.kept += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(outcome)
    }

    /// Member ids currently linked to a stay, without loading the
    /// member rows.
    pub async fn member_ids(&self, stay_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        let links = self
            .gateway
            .scoped::<L>()
            .filter(L::stay_column().eq(stay_id))
            .all(self.gateway.db())
            .await?;
        Ok(links.iter().map(L::target_of).collect())
    }

    async fn link_exists(&self, stay_id: Uuid, target_id: Uuid) -> Result<bool, ServiceError> {
        Ok(self
            .gateway
            .scoped::<L>()
            .filter(L::stay_column().eq(stay_id))
            .filter(L::target_column().eq(target_id))
            .one(self.gateway.db())
            .await?
            .is_some())
    }

    async fn require_stay(&self, stay_id: Uuid) -> Result<models::stay::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::Stay>(stay_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Stay"))
    }
}

/// Guest membership for a stay.
pub type GuestMemberships<'a> = Memberships<'a, group_guest::Entity>;
/// Room membership for a stay.
pub type RoomMemberships<'a> = Memberships<'a, group_room::Entity>;
