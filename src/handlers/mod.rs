//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for the Innkeep API.

use axum::extract::State;
use axum::response::Json;

use crate::error::ApiError;
use crate::models::ServiceInfo;
use crate::server::AppState;

pub mod catalog;
pub mod rooms;
pub mod stays;
pub mod tenants;
pub mod users;

/// Root handler that returns basic service information
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::default())
}

/// Liveness and database health probe.
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    crate::db::health_check(&state.db).await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
