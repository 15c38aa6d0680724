//! # Service Catalog
//!
//! Chargeable hotel services and the tickets that bill them to a stay.
//! A ticket snapshots the catalog price at issue time, so later price
//! changes never rewrite past charges.

use sea_orm::{ActiveValue, ColumnTrait, IntoActiveModel, PaginatorTrait, QueryFilter};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::gateway::Gateway;
use crate::models::{self, service, service_ticket};

/// Request data for creating or replacing a catalog service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub price: f64,
}

/// Request data for issuing a ticket against a stay.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueTicketRequest {
    pub stay_id: Uuid,
    pub service_id: Uuid,
    pub user_id: Uuid,
}

/// Catalog and ticket operations within one tenant scope.
pub struct CatalogService<'a> {
    gateway: Gateway<'a>,
}

impl<'a> CatalogService<'a> {
    pub fn new(gateway: Gateway<'a>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, request: ServiceRequest) -> Result<service::Model, ServiceError> {
        let name = validate_request(&request)?;
        self.require_unique_name(&name, None).await?;

        let active = service::ActiveModel {
            name: ActiveValue::Set(name),
            price: ActiveValue::Set(request.price),
            ..Default::default()
        };
        Ok(self.gateway.insert::<models::Service>(active).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<service::Model, ServiceError> {
        self.gateway
            .find_by_id::<models::Service>(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Service"))
    }

    pub async fn list(&self) -> Result<Vec<service::Model>, ServiceError> {
        Ok(self.gateway.find_all::<models::Service>().await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: ServiceRequest,
    ) -> Result<service::Model, ServiceError> {
        let name = validate_request(&request)?;
        let existing = self.get(id).await?;
        self.require_unique_name(&name, Some(id)).await?;

        let mut active = existing.into_active_model();
        active.name = ActiveValue::Set(name);
        active.price = ActiveValue::Set(request.price);
        Ok(self.gateway.update::<models::Service>(active).await?)
    }

    /// Deletes a catalog service. Refused while tickets reference it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;

        let tickets = self
            .gateway
            .scoped::<models::ServiceTicket>()
            .filter(service_ticket::Column::ServiceId.eq(id))
            .count(self.gateway.db())
            .await?;
        if tickets > 0 {
            return Err(ServiceError::in_use("Service", "service tickets"));
        }

        self.gateway.delete_by_id::<models::Service>(id).await?;
        Ok(())
    }

    /// Issues a ticket charging a catalog service to a stay, snapshotting
    /// the current catalog price.
    pub async fn issue_ticket(
        &self,
        request: IssueTicketRequest,
    ) -> Result<service_ticket::Model, ServiceError> {
        if !self.gateway.exists::<models::Stay>(request.stay_id).await? {
            return Err(ServiceError::not_found("Stay"));
        }
        if !self.gateway.exists::<models::User>(request.user_id).await? {
            return Err(ServiceError::not_found("User"));
        }
        let service = self.get(request.service_id).await?;

        let active = service_ticket::ActiveModel {
            stay_id: ActiveValue::Set(request.stay_id),
            service_id: ActiveValue::Set(request.service_id),
            user_id: ActiveValue::Set(request.user_id),
            price: ActiveValue::Set(service.price),
            ..Default::default()
        };
        Ok(self.gateway.insert::<models::ServiceTicket>(active).await?)
    }

    /// Lists the tickets charged to a stay.
    pub async fn tickets_for_stay(
        &self,
        stay_id: Uuid,
    ) -> Result<Vec<service_ticket::Model>, ServiceError> {
        if !self.gateway.exists::<models::Stay>(stay_id).await? {
            return Err(ServiceError::not_found("Stay"));
        }

        Ok(self
            .gateway
            .scoped::<models::ServiceTicket>()
            .filter(service_ticket::Column::StayId.eq(stay_id))
            .all(self.gateway.db())
            .await?)
    }

    /// Deletes a ticket, reversing the charge.
    pub async fn void_ticket(&self, id: Uuid) -> Result<(), ServiceError> {
        if !self.gateway.delete_by_id::<models::ServiceTicket>(id).await? {
            return Err(ServiceError::not_found("Service ticket"));
        }
        Ok(())
    }

    async fn require_unique_name(
        &self,
        name: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = self
            .gateway
            .scoped::<models::Service>()
            .filter(service::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(service::Column::Id.ne(id));
        }
        if query.one(self.gateway.db()).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "service '{name}' already exists"
            )));
        }
        Ok(())
    }
}

fn validate_request(request: &ServiceRequest) -> Result<String, ServiceError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ServiceError::Validation(
            "service name must not be empty".to_string(),
        ));
    }
    if request.price < 0.0 {
        return Err(ServiceError::Validation(
            "service price must not be negative".to_string(),
        ));
    }
    Ok(name.to_string())
}
