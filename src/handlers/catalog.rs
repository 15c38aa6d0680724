//! # Service Catalog Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::service;
use crate::server::AppState;
use crate::services::CatalogService;
use crate::services::catalog::ServiceRequest;
use crate::tenant_context::TenantContext;

pub async fn list_services(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<service::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let services = CatalogService::new(gateway).list().await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<ServiceRequest>,
) -> Result<(StatusCode, Json<service::Model>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let created = CatalogService::new(gateway).create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_service(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<service::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let found = CatalogService::new(gateway).get(id).await?;
    Ok(Json(found))
}

pub async fn update_service(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<ServiceRequest>,
) -> Result<Json<service::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let updated = CatalogService::new(gateway).update(id, request).await?;
    Ok(Json(updated))
}

pub async fn delete_service(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    CatalogService::new(gateway).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn void_ticket(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    CatalogService::new(gateway).void_ticket(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
