//! # Tenant Administration Handlers
//!
//! Tenant registry endpoints. These operate outside the tenant row
//! filter and require admin access.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::auth::RequestIdentity;
use crate::error::ApiError;
use crate::models::enums::AccessLevel;
use crate::models::tenant;
use crate::server::AppState;
use crate::services::TenantService;
use crate::services::tenant::TenantRequest;

pub async fn list_tenants(
    State(state): State<AppState>,
    identity: RequestIdentity,
) -> Result<Json<Vec<tenant::Model>>, ApiError> {
    identity.require(AccessLevel::Admin)?;
    let tenants = TenantService::new(&state.db).list().await?;
    Ok(Json(tenants))
}

pub async fn create_tenant(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Json(request): Json<TenantRequest>,
) -> Result<(StatusCode, Json<tenant::Model>), ApiError> {
    identity.require(AccessLevel::Admin)?;
    let created = TenantService::new(&state.db).create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_tenant(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<Uuid>,
) -> Result<Json<tenant::Model>, ApiError> {
    identity.require(AccessLevel::Admin)?;
    let found = TenantService::new(&state.db).get(id).await?;
    Ok(Json(found))
}

pub async fn rename_tenant(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<Uuid>,
    Json(request): Json<TenantRequest>,
) -> Result<Json<tenant::Model>, ApiError> {
    identity.require(AccessLevel::Admin)?;
    let updated = TenantService::new(&state.db).rename(id, request).await?;
    Ok(Json(updated))
}

pub async fn delete_tenant(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    identity.require(AccessLevel::Admin)?;
    TenantService::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
