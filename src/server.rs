//! # Server Configuration
//!
//! This module contains the server setup and routing for the Innkeep API.

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::context_middleware;
use crate::config::AppConfig;
use crate::handlers;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/stays", get(handlers::stays::list_stays).post(handlers::stays::create_stay))
        .route(
            "/stays/{id}",
            get(handlers::stays::get_stay)
                .patch(handlers::stays::update_stay)
                .delete(handlers::stays::delete_stay),
        )
        .route("/stays/{id}/state", post(handlers::stays::change_state))
        .route(
            "/stays/{id}/guests",
            get(handlers::stays::list_stay_guests)
                .post(handlers::stays::add_stay_guest)
                .put(handlers::stays::set_stay_guests),
        )
        .route(
            "/stays/{id}/guests/{guest_id}",
            delete(handlers::stays::remove_stay_guest),
        )
        .route(
            "/stays/{id}/rooms",
            get(handlers::stays::list_stay_rooms)
                .post(handlers::stays::add_stay_room)
                .put(handlers::stays::set_stay_rooms),
        )
        .route(
            "/stays/{id}/rooms/{room_id}",
            delete(handlers::stays::remove_stay_room),
        )
        .route(
            "/stays/{id}/tickets",
            get(handlers::stays::list_stay_tickets).post(handlers::stays::issue_stay_ticket),
        )
        .route("/tickets/{id}", delete(handlers::catalog::void_ticket))
        .route(
            "/rooms",
            get(handlers::rooms::list_rooms).post(handlers::rooms::create_room),
        )
        .route(
            "/rooms/{id}",
            get(handlers::rooms::get_room)
                .put(handlers::rooms::update_room)
                .delete(handlers::rooms::delete_room),
        )
        .route("/rooms/{id}/status", put(handlers::rooms::set_room_status))
        .route(
            "/room-types",
            get(handlers::rooms::list_room_types).post(handlers::rooms::create_room_type),
        )
        .route(
            "/room-types/{id}",
            get(handlers::rooms::get_room_type)
                .put(handlers::rooms::update_room_type)
                .delete(handlers::rooms::delete_room_type),
        )
        .route(
            "/services",
            get(handlers::catalog::list_services).post(handlers::catalog::create_service),
        )
        .route(
            "/services/{id}",
            get(handlers::catalog::get_service)
                .put(handlers::catalog::update_service)
                .delete(handlers::catalog::delete_service),
        )
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
        .route(
            "/tenants",
            get(handlers::tenants::list_tenants).post(handlers::tenants::create_tenant),
        )
        .route(
            "/tenants/{id}",
            get(handlers::tenants::get_tenant)
                .put(handlers::tenants::rename_tenant)
                .delete(handlers::tenants::delete_tenant),
        )
        .layer(axum::middleware::from_fn_with_state(
            Arc::clone(&state.config),
            context_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.bind_addr().map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, %profile, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
