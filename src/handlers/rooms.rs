//! # Room and Room Type Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::enums::RoomStatus;
use crate::models::{room, room_type};
use crate::server::AppState;
use crate::services::room::RoomRequest;
use crate::services::room_type::RoomTypeRequest;
use crate::services::{RoomService, RoomTypeService};
use crate::tenant_context::TenantContext;

// Rooms

pub async fn list_rooms(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<room::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let rooms = RoomService::new(gateway).list().await?;
    Ok(Json(rooms))
}

pub async fn create_room(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<RoomRequest>,
) -> Result<(StatusCode, Json<room::Model>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room = RoomService::new(gateway).create(request).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn get_room(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<room::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room = RoomService::new(gateway).get(id).await?;
    Ok(Json(room))
}

pub async fn update_room(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<RoomRequest>,
) -> Result<Json<room::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room = RoomService::new(gateway).update(id, request).await?;
    Ok(Json(room))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: RoomStatus,
}

pub async fn set_room_status(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<room::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room = RoomService::new(gateway).set_status(id, request.status).await?;
    Ok(Json(room))
}

pub async fn delete_room(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    RoomService::new(gateway).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Room types

pub async fn list_room_types(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<room_type::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let types = RoomTypeService::new(gateway).list().await?;
    Ok(Json(types))
}

pub async fn create_room_type(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<RoomTypeRequest>,
) -> Result<(StatusCode, Json<room_type::Model>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room_type = RoomTypeService::new(gateway).create(request).await?;
    Ok((StatusCode::CREATED, Json(room_type)))
}

pub async fn get_room_type(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<room_type::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room_type = RoomTypeService::new(gateway).get(id).await?;
    Ok(Json(room_type))
}

pub async fn update_room_type(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<RoomTypeRequest>,
) -> Result<Json<room_type::Model>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let room_type = RoomTypeService::new(gateway).update(id, request).await?;
    Ok(Json(room_type))
}

pub async fn delete_room_type(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    RoomTypeService::new(gateway).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
