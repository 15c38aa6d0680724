//! # Tenant Administration
//!
//! CRUD over the tenant registry itself. Tenants are the root of
//! isolation and are never tenant-filtered; these operations are
//! privileged and gated at the routing layer.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    PaginatorTrait,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::tenant::{self, Entity as Tenant};

/// Request data for creating or renaming a tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantRequest {
    pub name: String,
}

/// Tenant registry operations. Deliberately built on the raw connection,
/// not the scoped gateway.
pub struct TenantService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TenantService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, request: TenantRequest) -> Result<tenant::Model, ServiceError> {
        let name = validate_name(&request.name)?;
        let now = Utc::now();

        let active = tenant::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name),
            created_at: ActiveValue::Set(now.into()),
            updated_at: ActiveValue::Set(now.into()),
        };
        Ok(active.insert(self.db).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<tenant::Model, ServiceError> {
        Tenant::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Tenant"))
    }

    pub async fn list(&self) -> Result<Vec<tenant::Model>, ServiceError> {
        Ok(Tenant::find().all(self.db).await?)
    }

    pub async fn rename(&self, id: Uuid, request: TenantRequest) -> Result<tenant::Model, ServiceError> {
        let name = validate_name(&request.name)?;
        let existing = self.get(id).await?;

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(name);
        active.updated_at = ActiveValue::Set(Utc::now().into());
        Ok(active.update(self.db).await?)
    }

    /// Deletes a tenant. Scoped rows go with it through cascading
    /// foreign keys.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        existing.delete(self.db).await?;
        Ok(())
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(Tenant::find_by_id(id).one(self.db).await?.is_some())
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(Tenant::find().count(self.db).await?)
    }
}

fn validate_name(name: &str) -> Result<String, ServiceError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "tenant name must not be empty".to_string(),
        ));
    }
    if name.len() > 255 {
        return Err(ServiceError::Validation(
            "tenant name must be at most 255 characters".to_string(),
        ));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validation() {
        assert_eq!(validate_name("  Grand Hotel  ").unwrap(), "Grand Hotel");
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(256)).is_err());
    }
}
