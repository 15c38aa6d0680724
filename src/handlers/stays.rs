//! # Stay Handlers
//!
//! Endpoints for the reservation aggregate: stays, their lifecycle
//! state, group membership, and service tickets.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;
use crate::models::enums::StayState;
use crate::server::AppState;
use crate::services::catalog::IssueTicketRequest;
use crate::services::membership::{AddOutcome, RemoveOutcome, SyncOutcome};
use crate::services::reservation::{CreateStayRequest, StayDto, UpdateStayRequest};
use crate::services::{CatalogService, GuestMemberships, RoomMemberships, StayService};
use crate::tenant_context::TenantContext;

pub async fn list_stays(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<StayDto>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let stays = StayService::new(gateway).list().await?;
    Ok(Json(stays))
}

pub async fn create_stay(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<CreateStayRequest>,
) -> Result<(StatusCode, Json<StayDto>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let stay = StayService::new(gateway).create(request).await?;
    Ok((StatusCode::CREATED, Json(stay)))
}

pub async fn get_stay(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<StayDto>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let stay = StayService::new(gateway).get(id).await?;
    Ok(Json(stay))
}

pub async fn update_stay(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStayRequest>,
) -> Result<Json<StayDto>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let stay = StayService::new(gateway).update(id, request).await?;
    Ok(Json(stay))
}

pub async fn delete_stay(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    StayService::new(gateway).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body for a state change request.
#[derive(Debug, Deserialize)]
pub struct ChangeStateRequest {
    pub state: String,
}

pub async fn change_state(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangeStateRequest>,
) -> Result<Json<StayDto>, ApiError> {
    let next = StayState::parse(&request.state).ok_or_else(|| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "INVALID_STATE",
            format!("Unknown stay state '{}'", request.state),
        )
    })?;

    let gateway = Gateway::for_context(&state.db, &context);
    let stay = StayService::new(gateway).change_state(id, next).await?;
    Ok(Json(stay))
}

// Group membership: guests

#[derive(Debug, Deserialize)]
pub struct AddGuestRequest {
    pub guest_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetGuestsRequest {
    pub guest_ids: Vec<Uuid>,
}

pub async fn list_stay_guests(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::models::guest::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let members = GuestMemberships::new(gateway).members(id).await?;
    Ok(Json(members))
}

pub async fn add_stay_guest(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<AddGuestRequest>,
) -> Result<Json<AddOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = GuestMemberships::new(gateway)
        .add(id, request.guest_id)
        .await?;
    Ok(Json(outcome))
}

pub async fn set_stay_guests(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<SetGuestsRequest>,
) -> Result<Json<SyncOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = GuestMemberships::new(gateway)
        .sync(id, &request.guest_ids)
        .await?;
    Ok(Json(outcome))
}

pub async fn remove_stay_guest(
    State(state): State<AppState>,
    context: TenantContext,
    Path((id, guest_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RemoveOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = GuestMemberships::new(gateway).remove(id, guest_id).await?;
    Ok(Json(outcome))
}

// Group membership: rooms

#[derive(Debug, Deserialize)]
pub struct AddRoomRequest {
    pub room_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetRoomsRequest {
    pub room_ids: Vec<Uuid>,
}

pub async fn list_stay_rooms(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::models::room::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let members = RoomMemberships::new(gateway).members(id).await?;
    Ok(Json(members))
}

pub async fn add_stay_room(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<AddRoomRequest>,
) -> Result<Json<AddOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = RoomMemberships::new(gateway).add(id, request.room_id).await?;
    Ok(Json(outcome))
}

pub async fn set_stay_rooms(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<SetRoomsRequest>,
) -> Result<Json<SyncOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = RoomMemberships::new(gateway)
        .sync(id, &request.room_ids)
        .await?;
    Ok(Json(outcome))
}

pub async fn remove_stay_room(
    State(state): State<AppState>,
    context: TenantContext,
    Path((id, room_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RemoveOutcome>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let outcome = RoomMemberships::new(gateway).remove(id, room_id).await?;
    Ok(Json(outcome))
}

// Service tickets

#[derive(Debug, Deserialize)]
pub struct IssueTicketBody {
    pub service_id: Uuid,
    pub user_id: Uuid,
}

pub async fn list_stay_tickets(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::models::service_ticket::Model>>, ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let tickets = CatalogService::new(gateway).tickets_for_stay(id).await?;
    Ok(Json(tickets))
}

pub async fn issue_stay_ticket(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(body): Json<IssueTicketBody>,
) -> Result<(StatusCode, Json<crate::models::service_ticket::Model>), ApiError> {
    let gateway = Gateway::for_context(&state.db, &context);
    let ticket = CatalogService::new(gateway)
        .issue_ticket(IssueTicketRequest {
            stay_id: id,
            service_id: body.service_id,
            user_id: body.user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}
