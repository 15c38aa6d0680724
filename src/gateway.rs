//! # Persistence Gateway
//!
//! Tenant-aware data access applied uniformly across every tenant-scoped
//! entity. The gateway gives three structural guarantees:
//!
//! - **Stamping**: newly persisted rows get their `tenant_id` filled from
//!   the resolved tenant when unset; an explicitly pre-set tenant is
//!   preserved (default-fill, not override).
//! - **Row filtering**: every read, update and delete against a
//!   tenant-scoped entity is constrained to the resolved tenant. With no
//!   tenant resolved the filter is skipped; that mode is privileged and
//!   gated at the authorization boundary, never here.
//! - **Timestamps**: every update sets `updated_at`.
//!
//! The set of tenant-scoped entities is an explicit compile-time list
//! (the `tenant_scoped!` invocation below), not discovered at runtime.
//! The Tenant entity itself is deliberately absent from that list.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection,
    DeleteMany, EntityTrait, IntoActiveModel, PrimaryKeyTrait, QueryFilter, Select,
};
use thiserror::Error;
use uuid::Uuid;

use crate::tenant_context::TenantContext;

/// Errors raised by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no tenant resolved for the current operation")]
    NoTenantContext,
    #[error("write targets a row owned by another tenant")]
    CrossTenantWrite { id: Option<Uuid> },
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

/// Contract for entities subject to tenant stamping and row filtering.
///
/// Every implementor carries `id`, `tenant_id`, `created_at` and
/// `updated_at` columns. Implemented only through the `tenant_scoped!`
/// macro so the scoped set stays visible in one place.
pub trait TenantScoped: EntityTrait {
    /// The `tenant_id` column used by the row filter.
    fn tenant_column() -> Self::Column;

    /// Owning tenant of a loaded row.
    fn tenant_of(model: &Self::Model) -> Uuid;

    /// Tenant carried by an active model, if set to a real value.
    /// `NotSet` and the nil UUID both count as "unset".
    fn tenant_value(active: &Self::ActiveModel) -> Option<Uuid>;

    /// Primary key carried by an active model, if set.
    fn id_value(active: &Self::ActiveModel) -> Option<Uuid>;

    /// Fills id, tenant and timestamps on a row about to be inserted.
    /// A pre-set tenant is left untouched.
    fn stamp_new(active: &mut Self::ActiveModel, tenant: Option<Uuid>, now: DateTimeWithTimeZone);

    /// Sets `updated_at` on a row about to be updated.
    fn touch_updated(active: &mut Self::ActiveModel, now: DateTimeWithTimeZone);
}

macro_rules! tenant_scoped {
    ($($module:ident),+ $(,)?) => {$(
        impl TenantScoped for crate::models::$module::Entity {
            fn tenant_column() -> crate::models::$module::Column {
                crate::models::$module::Column::TenantId
            }

            fn tenant_of(model: &crate::models::$module::Model) -> Uuid {
                model.tenant_id
            }

            fn tenant_value(active: &crate::models::$module::ActiveModel) -> Option<Uuid> {
                match &active.tenant_id {
                    ActiveValue::Set(value) | ActiveValue::Unchanged(value) if !value.is_nil() => {
                        Some(*value)
                    }
                    _ => None,
                }
            }

            fn id_value(active: &crate::models::$module::ActiveModel) -> Option<Uuid> {
                match &active.id {
                    ActiveValue::Set(value) | ActiveValue::Unchanged(value) => Some(*value),
                    ActiveValue::NotSet => None,
                }
            }

            fn stamp_new(
                active: &mut crate::models::$module::ActiveModel,
                tenant: Option<Uuid>,
                now: DateTimeWithTimeZone,
            ) {
                if matches!(active.id, ActiveValue::NotSet) {
                    active.id = ActiveValue::Set(Uuid::new_v4());
                }
                if Self::tenant_value(active).is_none()
                    && let Some(tenant) = tenant
                {
                    active.tenant_id = ActiveValue::Set(tenant);
                }
                if matches!(active.created_at, ActiveValue::NotSet) {
                    active.created_at = ActiveValue::Set(now);
                }
                if matches!(active.updated_at, ActiveValue::NotSet) {
                    active.updated_at = ActiveValue::Set(now);
                }
            }

            fn touch_updated(
                active: &mut crate::models::$module::ActiveModel,
                now: DateTimeWithTimeZone,
            ) {
                active.updated_at = ActiveValue::Set(now);
            }
        }
    )+};
}

// The complete list of tenant-scoped collections. Tenant is excluded by
// design: it is the root of isolation, never filtered.
tenant_scoped!(
    user,
    guest,
    company,
    profession,
    city,
    country,
    visit_reason,
    room_type,
    room,
    stay,
    group_guest,
    group_room,
    service,
    service_ticket,
);

/// Short-lived, per-request data access handle carrying the resolved
/// tenant. Pure function of its inputs; safe for unlimited concurrent
/// instances.
#[derive(Debug, Clone, Copy)]
pub struct Gateway<'a> {
    db: &'a DatabaseConnection,
    tenant: Option<Uuid>,
}

impl<'a> Gateway<'a> {
    pub fn new(db: &'a DatabaseConnection, tenant: Option<Uuid>) -> Self {
        Self { db, tenant }
    }

    /// Builds a gateway scoped to whatever the context resolves to.
    pub fn for_context(db: &'a DatabaseConnection, context: &TenantContext) -> Self {
        Self::new(db, context.resolve())
    }

    pub fn db(&self) -> &'a DatabaseConnection {
        self.db
    }

    pub fn tenant(&self) -> Option<Uuid> {
        self.tenant
    }

    /// The resolved tenant, or `NoTenantContext` for operations that
    /// must not run unscoped.
    pub fn require_tenant(&self) -> Result<Uuid, GatewayError> {
        self.tenant.ok_or(GatewayError::NoTenantContext)
    }

    /// Base query for a tenant-scoped entity with the row filter applied.
    /// Everything read through the gateway starts here.
    pub fn scoped<E: TenantScoped>(&self) -> Select<E> {
        let mut query = E::find();
        if let Some(tenant) = self.tenant {
            query = query.filter(E::tenant_column().eq(tenant));
        }
        query
    }

    /// Delete statement for a tenant-scoped entity with the row filter
    /// applied.
    pub fn scoped_delete<E: TenantScoped>(&self) -> DeleteMany<E> {
        let mut delete = E::delete_many();
        if let Some(tenant) = self.tenant {
            delete = delete.filter(E::tenant_column().eq(tenant));
        }
        delete
    }

    /// Finds a row by id within the current tenant scope.
    pub async fn find_by_id<E>(&self, id: Uuid) -> Result<Option<E::Model>, GatewayError>
    where
        E: TenantScoped,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    {
        let mut query = E::find_by_id(id);
        if let Some(tenant) = self.tenant {
            query = query.filter(E::tenant_column().eq(tenant));
        }
        Ok(query.one(self.db).await?)
    }

    /// Lists all rows of an entity within the current tenant scope.
    pub async fn find_all<E>(&self) -> Result<Vec<E::Model>, GatewayError>
    where
        E: TenantScoped,
    {
        Ok(self.scoped::<E>().all(self.db).await?)
    }

    /// Whether a row with this id exists within the current tenant scope.
    pub async fn exists<E>(&self, id: Uuid) -> Result<bool, GatewayError>
    where
        E: TenantScoped,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    {
        Ok(self.find_by_id::<E>(id).await?.is_some())
    }

    /// Persists a new row, stamping id, tenant and timestamps first.
    ///
    /// A pre-set non-nil `tenant_id` is preserved unchanged; stamping is
    /// a default-fill. Callers with no tenant resolved and no explicit
    /// tenant fall through to the store's NOT NULL backstop.
    pub async fn insert<E>(&self, mut active: E::ActiveModel) -> Result<E::Model, GatewayError>
    where
        E: TenantScoped,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelBehavior + Send,
    {
        E::stamp_new(&mut active, self.tenant, Utc::now().into());
        Ok(active.insert(self.db).await?)
    }

    /// Persists changes to an existing row, refreshing `updated_at`.
    ///
    /// Rejects writes whose populated `tenant_id` differs from the
    /// resolved tenant. Rows loaded through the gateway's own scoped
    /// reads can never trip this; it guards hand-built active models.
    pub async fn update<E>(&self, mut active: E::ActiveModel) -> Result<E::Model, GatewayError>
    where
        E: TenantScoped,
        E::Model: IntoActiveModel<E::ActiveModel>,
        E::ActiveModel: ActiveModelBehavior + Send,
    {
        if let (Some(tenant), Some(owner)) = (self.tenant, E::tenant_value(&active))
            && owner != tenant
        {
            return Err(GatewayError::CrossTenantWrite {
                id: E::id_value(&active),
            });
        }
        E::touch_updated(&mut active, Utc::now().into());
        Ok(active.update(self.db).await?)
    }

    /// Deletes a row by id within the current tenant scope. Returns
    /// whether a row was actually removed.
    pub async fn delete_by_id<E>(&self, id: Uuid) -> Result<bool, GatewayError>
    where
        E: TenantScoped,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    {
        let mut delete = E::delete_by_id(id);
        if let Some(tenant) = self.tenant {
            delete = delete.filter(E::tenant_column().eq(tenant));
        }
        let result = delete.exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::guest;
    use sea_orm::ActiveValue;

    fn blank_guest() -> guest::ActiveModel {
        guest::ActiveModel {
            first_name: ActiveValue::Set("Ana".to_string()),
            last_name: ActiveValue::Set("Ruiz".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn stamp_fills_unset_tenant() {
        let tenant = Uuid::new_v4();
        let mut active = blank_guest();

        guest::Entity::stamp_new(&mut active, Some(tenant), Utc::now().into());

        assert_eq!(guest::Entity::tenant_value(&active), Some(tenant));
        assert!(guest::Entity::id_value(&active).is_some());
        assert!(matches!(active.created_at, ActiveValue::Set(_)));
        assert!(matches!(active.updated_at, ActiveValue::Set(_)));
    }

    #[test]
    fn stamp_preserves_preset_tenant() {
        let context_tenant = Uuid::new_v4();
        let seeded_tenant = Uuid::new_v4();
        let mut active = blank_guest();
        active.tenant_id = ActiveValue::Set(seeded_tenant);

        guest::Entity::stamp_new(&mut active, Some(context_tenant), Utc::now().into());

        assert_eq!(guest::Entity::tenant_value(&active), Some(seeded_tenant));
    }

    #[test]
    fn stamp_treats_nil_tenant_as_unset() {
        let tenant = Uuid::new_v4();
        let mut active = blank_guest();
        active.tenant_id = ActiveValue::Set(Uuid::nil());

        guest::Entity::stamp_new(&mut active, Some(tenant), Utc::now().into());

        assert_eq!(guest::Entity::tenant_value(&active), Some(tenant));
    }

    #[test]
    fn stamp_without_tenant_leaves_tenant_unset() {
        let mut active = blank_guest();

        guest::Entity::stamp_new(&mut active, None, Utc::now().into());

        assert_eq!(guest::Entity::tenant_value(&active), None);
    }

    #[test]
    fn require_tenant_errors_when_unresolved() {
        let db = DatabaseConnection::default();
        let gateway = Gateway::new(&db, None);

        assert!(matches!(
            gateway.require_tenant(),
            Err(GatewayError::NoTenantContext)
        ));
    }
}
