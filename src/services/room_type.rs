//! # Room Types
//!
//! Room category administration: names are unique per tenant and a type
//! cannot be deleted while rooms reference it.

use sea_orm::{ActiveValue, ColumnTrait, IntoActiveModel, PaginatorTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::gateway::Gateway;
use crate::models::{self, room, room_type};

/// Request data for creating or replacing a room type.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomTypeRequest {
    pub name: String,
    pub price: f64,
}

/// Room type operations within one tenant scope.
pub struct RoomTypeService<'a> {
    gateway: Gateway<'a>,
}

impl<'a> RoomTypeService<'a> {
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, request: RoomTypeRequest) -> Result<room_type::Model, ServiceError> {
        let name = validate_request(&request)?;
        self.require_unique_name(&name, None).await?;

        let active = room_type::ActiveModel {
            name: ActiveValue::Set(name),
            price: ActiveValue::Set(request.price),
            ..Default::default()
        };
        Ok(self.gateway.insert::<models::RoomType>(active).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<room_type::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::RoomType>(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room type"))
    }

    pub async fn list(&self) -> Result<Vec<room_type::Model>, ServiceError> {
        Ok(self.gateway.find_all::<models::RoomType>().await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: RoomTypeRequest,
    ) -> Result<room_type::Model, ServiceError> {
        let name = validate_request(&request)?;
        let existing = self.get(id).await?;
        self.require_unique_name(&name, Some(id)).await?;

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(name);
        active.price = ActiveValue::Set(request.price);
        Ok(self.gateway.update::<models::RoomType>(active).await?)
    }

    /// Deletes a room type. Refused while any room references it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;

        let rooms = self
            .gateway
            .scoped::<models::Room>()
            .filter(room::Column::RoomTypeId.eq(id))
            .count(self.gateway.db())
            .await?;
        if rooms > 0 {
            return Err(ServiceError::in_use("Room type", "rooms"));
        }

        self.gateway.delete_by_id::<models::RoomType>(id).await?;
        Ok(())
    }

    async fn require_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = self
            .gateway
            .scoped::<models::RoomType>()
            .filter(room_type::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(room_type::Column::Id.ne(id));
        }
        if query.one(self.gateway.db()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "room type '{name}' already exists"
            )));
        }
        Ok(())
    }
}

fn validate_request(request: &RoomTypeRequest) -> Result<String, ServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "room type name must not be empty".to_string(),
        ));
    }
    if request.price < 0.0 {
        return Err(ServiceError::Validation(
            "room type price must not be negative".to_string(),
        ));
    }
    Ok(name.to_string())
}
