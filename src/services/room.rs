//! # Rooms
//!
//! Room administration: numbers are unique per tenant, every room
//! references an existing room type, and a room cannot be deleted while
//! a stay's room group includes it.

use sea_orm::{ActiveValue, ColumnTrait, IntoActiveModel, PaginatorTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::gateway::Gateway;
use crate::models::{self, enums::RoomStatus, group_room, room};

/// Request data for creating or replacing a room.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomRequest {
    pub number: String,
    pub room_type_id: Uuid,
    #[serde(default)]
    pub status: Option<RoomStatus>,
}

/// Room operations within one tenant scope.
pub struct RoomService<'a> {
    gateway: Gateway<'a>,
}

impl<'a> RoomService<'a> {
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, request: RoomRequest) -> Result<room::Model, ServiceError> {
        let number = validate_number(&request.number)?;
        self.require_room_type(request.room_type_id).await?;
        self.require_unique_number(&number, None).await?;

        let active = room::ActiveModel {
            number: ActiveValue::Set(number),
            room_type_id: ActiveValue::Set(request.room_type_id),
            status: ActiveValue::Set(request.status.unwrap_or(RoomStatus::Available)),
            ..Default::default()
        };
        Ok(self.gateway.insert::<models::Room>(active).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<room::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::Room>(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Room"))
    }

    pub async fn list(&self) -> Result<Vec<room::Model>, ServiceError> {
        Ok(self.gateway.find_all::<models::Room>().await?)
    }

    pub async fn update(&self, id: Uuid, request: RoomRequest) -> Result<room::Model, ServiceError> {
        let number = validate_number(&request.number)?;
        let existing = self.get(id).await?;
        self.require_room_type(request.room_type_id).await?;
        self.require_unique_number(&number, Some(id)).await?;

        let status = request.status.unwrap_or(existing.status);
        let mut active = existing.into_active_model();
        active.number = ActiveValue::Set(number);
        active.room_type_id = ActiveValue::Set(request.room_type_id);
        active.status = ActiveValue::Set(status);
        Ok(self.gateway.update::<models::Room>(active).await?)
    }

    /// Updates only the operational status of a room.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: RoomStatus,
    ) -> Result<room::Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut active = existing.into_active_model();
        active.status = ActiveValue::Set(status);
        Ok(self.gateway.update::<models::Room>(active).await?)
    }

    /// Deletes a room. Refused while any stay's room group includes it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;

        let links = self
            .gateway
            .scoped::<models::GroupRoom>()
            .filter(group_room::Column::RoomId.eq(id))
            .count(self.gateway.db())
            .await?;
        if links > 0 {
            return Err(ServiceError::in_use("Room", "stays"));
        }

        self.gateway.delete_by_id::<models::Room>(id).await?;
        Ok(())
    }

    async fn require_room_type(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.gateway.exists::<models::RoomType>(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Room type"))
        }
    }

    async fn require_unique_number(
        &self,
        number: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = self
            .gateway
            .scoped::<models::Room>()
            .filter(room::Column::Number.eq(number));
        if let Some(id) = exclude {
            query = query.filter(room::Column::Id.ne(id));
        }
        if query.one(self.gateway.db()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "room '{number}' already exists"
            )));
        }
        Ok(())
    }
}

fn validate_number(number: &str) -> Result<String, ServiceError> {
    let number = number.trim();
    if number.is_empty() {
        return Err(ServiceError::Validation(
            "room number must not be empty".to_string(),
        ));
    }
    Ok(number.to_string())
}
