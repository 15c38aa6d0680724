//! # Staff Users
//!
//! Staff account administration: emails are unique per tenant, and a
//! user cannot be deleted while service tickets name them as issuer.

use sea_orm::{ActiveValue, ColumnTrait, IntoActiveModel, PaginatorTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::gateway::Gateway;
use crate::models::{self, enums::AccessLevel, service_ticket, user};

/// Request data for creating or replacing a staff user.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub access_level: Option<AccessLevel>,
}

/// Staff user operations within one tenant scope.
pub struct UserService<'a> {
    gateway: Gateway<'a>,
}

impl<'a> UserService<'a> {
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, request: UserRequest) -> Result<user::Model, ServiceError> {
        let (name, email) = validate_request(&request)?;
        self.require_unique_email(&email, None).await?;

        let active = user::ActiveModel {
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            access_level: ActiveValue::Set(request.access_level.unwrap_or_default()),
            ..Default::default()
        };
        Ok(self.gateway.insert::<models::User>(active).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<user::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::User>(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(self.gateway.find_all::<models::User>().await?)
    }

    pub async fn update(&self, id: Uuid, request: UserRequest) -> Result<user::Model, ServiceError> {
        let (name, email) = validate_request(&request)?;
        let existing = self.get(id).await?;
        self.require_unique_email(&email, Some(id)).await?;

        let access_level = request.access_level.unwrap_or(existing.access_level);
        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(name);
        active.email = ActiveValue::Set(email);
        active.access_level = ActiveValue::Set(access_level);
        Ok(self.gateway.update::<models::User>(active).await?)
    }

    /// Deletes a staff user. Refused while tickets record them as the
    /// issuing user, so charge history keeps its author.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;

        let tickets = self
            .gateway
            .scoped::<models::ServiceTicket>()
            .filter(service_ticket::Column::UserId.eq(id))
            .count(self.gateway.db())
            .await?;
        if tickets > 0 {
            return Err(ServiceError::in_use("User", "service tickets"));
        }

        self.gateway.delete_by_id::<models::User>(id).await?;
        Ok(())
    }

    async fn require_unique_email(
        &self,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = self
            .gateway
            .scoped::<models::User>()
            .filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        if query.one(self.gateway.db()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "user '{email}' already exists"
            )));
        }
        Ok(())
    }
}

fn validate_request(request: &UserRequest) -> Result<(String, String), ServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "user name must not be empty".to_string(),
        ));
    }
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ServiceError::Validation(
            "user email must be a valid address".to_string(),
        ));
    }
    Ok((name.to_string(), email.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_validation() {
        let ok = UserRequest {
            name: "  Front Desk  ".to_string(),
            email: " desk@example.com ".to_string(),
            access_level: None,
        };
        assert_eq!(
            validate_request(&ok).unwrap(),
            ("Front Desk".to_string(), "desk@example.com".to_string())
        );

        let no_name = UserRequest {
            name: "   ".to_string(),
            email: "desk@example.com".to_string(),
            access_level: None,
        };
        assert!(validate_request(&no_name).is_err());

        let bad_email = UserRequest {
            name: "Front Desk".to_string(),
            email: "not-an-address".to_string(),
            access_level: None,
        };
        assert!(validate_request(&bad_email).is_err());
    }
}
