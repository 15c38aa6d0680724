//! Router-level tests for the stay state endpoint.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use innkeep::config::AppConfig;
use innkeep::server::{AppState, create_app};
use innkeep::services::StayService;
use innkeep::services::reservation::CreateStayRequest;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;
use uuid::Uuid;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_tenant, gateway, seed_guest, seed_visit_reason, setup_test_db};

async fn seed_stay(db: &DatabaseConnection, tenant: Uuid) -> Result<Uuid> {
    let reason = seed_visit_reason(db, tenant, "Leisure").await?;
    let holder = seed_guest(db, tenant, "Ana", "Ruiz").await?;
    let stay = StayService::new(gateway(db, tenant))
        .create(CreateStayRequest {
            visit_reason_id: reason,
            holder_id: holder,
            company_id: None,
            arrival_date: Utc::now().into(),
            departure_date: (Utc::now() + Duration::days(2)).into(),
            pax: 1,
            final_price: None,
            notes: None,
            guest_ids: vec![],
            room_ids: vec![],
        })
        .await?;
    Ok(stay.id)
}

fn app(db: DatabaseConnection) -> axum::Router {
    create_app(AppState {
        config: Arc::new(AppConfig::default()),
        db,
    })
}

fn change_state_request(stay: Uuid, tenant: Uuid, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/stays/{stay}/state"))
        .header("content-type", "application/json")
        .header("x-tenantid", tenant.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn unknown_state_name_maps_to_invalid_state() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;

    let response = app(db)
        .oneshot(change_state_request(stay, tenant, r#"{"state":"checked-in"}"#))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["code"], "INVALID_STATE");
    Ok(())
}

#[tokio::test]
async fn valid_state_change_succeeds_over_http() -> Result<()> {
    let db = setup_test_db().await?;
    let tenant = create_tenant(&db, "Grand Hotel").await?;
    let stay = seed_stay(&db, tenant).await?;

    let response = app(db)
        .oneshot(change_state_request(stay, tenant, r#"{"state":"active"}"#))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024).await?;
    let body: serde_json::Value = serde_json::from_slice(&bytes)?;
    assert_eq!(body["state"], "Active");
    Ok(())
}
