//! # Staff User Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::user;
use crate::server::AppState;
use crate::services::UserService;
use crate::services::user::UserRequest;
use crate::tenant_context::TenantContext;

pub async fn list_users(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<user::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let users = UserService::new(gateway).list().await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<UserRequest>,
) -> Result<(StatusCode, Json<user::Model>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let created = UserService::new(gateway).create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_user(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<user::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let found = UserService::new(gateway).get(id).await?;
    Ok(Json(found))
}

pub async fn update_user(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UserRequest>,
) -> Result<Json<user::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let updated = UserService::new(gateway).update(id, request).await?;
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    UserService::new(gateway).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
