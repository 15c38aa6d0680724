//! # Error Handling
//!
//! This module provides unified error handling for the Innkeep API,
//! implementing a consistent problem+json response format with a
//! correlation ID on every error body.
//!
//! Domain code raises [`ServiceError`]; the HTTP layer converts it into
//! an [`ApiError`] response.

use axum::{
    extract::rejection::JsonRejection,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::gateway::GatewayError;

/// Unified API error response structure
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status code for the response
    #[serde(skip_serializing)]
    pub status: StatusCode,
    /// Error code for programmatic handling
    pub code: Box<str>,
    /// Human-readable error message
    pub message: Box<str>,
    /// Additional error details (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Box<serde_json::Value>>,
    /// Correlation ID for client-server log correlation
    pub trace_id: Box<str>,
}

impl ApiError {
    /// Create a new API error with the given status code and message
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into().into_boxed_str(),
            message: message.into().into_boxed_str(),
            details: None,
            trace_id: Self::correlation_id(),
        }
    }

    /// Add details to the error
    pub fn with_details<V: Into<serde_json::Value>>(mut self, details: V) -> Self {
        self.details = Some(Box::new(details.into()));
        self
    }

    fn correlation_id() -> Box<str> {
        format!("corr-{}", &Uuid::new_v4().to_string()[..8]).into_boxed_str()
    }
}

/// Detects unique-constraint violations across the backends we run on.
/// Used to treat duplicate membership inserts as already-present rather
/// than failures.
pub fn is_unique_violation(error: &sea_orm::DbErr) -> bool {
    use sea_orm::RuntimeErr;

    const PG_UNIQUE: &str = "23505";
    const SQLITE_DUPLICATE_CODES: &[&str] = &["1555", "2067"];

    let runtime_err = match error {
        sea_orm::DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | sea_orm::DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return false,
    };

    let Some(db_error) = runtime_err.as_database_error() else {
        return false;
    };

    if db_error.is_unique_violation() {
        return true;
    }

    db_error.code().is_some_and(|code| {
        let code = code.as_ref();
        code == PG_UNIQUE || SQLITE_DUPLICATE_CODES.contains(&code)
    })
}

/// Errors raised by the domain services, independent of any transport.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },
    #[error("operation targets a row owned by another tenant")]
    CrossTenant,
    #[error("{0}")]
    Conflict(String),
    #[error("{entity} is referenced by {dependents} and cannot be deleted")]
    InUse {
        entity: &'static str,
        dependents: &'static str,
    },
    #[error("invalid state transition from {from} to {to}")]
    InvalidState { from: String, to: String },
    #[error("{0}")]
    Validation(String),
    #[error("no tenant resolved for the current operation")]
    NoTenantContext,
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn in_use(entity: &'static str, dependents: &'static str) -> Self {
        Self::InUse { entity, dependents }
    }
}

impl From<GatewayError> for ServiceError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::NoTenantContext => Self::NoTenantContext,
            GatewayError::CrossTenantWrite { .. } => Self::CrossTenant,
            GatewayError::Database(err) => Self::Database(err),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound { entity } => ApiError::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("{entity} not found"),
            ),
            ServiceError::CrossTenant => ApiError::new(
                StatusCode::FORBIDDEN,
                "CROSS_TENANT",
                "Resource belongs to another tenant",
            ),
            ServiceError::Conflict(message) => {
                ApiError::new(StatusCode::CONFLICT, "CONFLICT", &message)
            }
            ServiceError::InUse { entity, dependents } => ApiError::new(
                StatusCode::CONFLICT,
                "IN_USE",
                &format!("{entity} is referenced by {dependents} and cannot be deleted"),
            ),
            ServiceError::InvalidState { from, to } => ApiError::new(
                StatusCode::BAD_REQUEST,
                "INVALID_STATE",
                &format!("Invalid state transition from {from} to {to}"),
            ),
            ServiceError::Validation(message) => {
                ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
            }
            ServiceError::NoTenantContext => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "NO_TENANT_CONTEXT",
                "No tenant resolved for this request",
            ),
            ServiceError::Database(err) => err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/problem+json"),
        );

        (self.status, headers, axum::Json(self)).into_response()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

// Error mappers for common sources

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", error);

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "An internal error occurred",
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON: {}", err),
            JsonRejection::JsonSyntaxError(err) => format!("JSON syntax error: {}", err),
            JsonRejection::MissingJsonContentType(_) => {
                "Missing 'Content-Type: application/json' header".to_string()
            }
            _ => "Invalid request body".to_string(),
        };

        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", &message)
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(error: sea_orm::DbErr) -> Self {
        if is_unique_violation(&error) {
            tracing::debug!(?error, "Unique constraint violation detected");
            return Self::new(StatusCode::CONFLICT, "CONFLICT", "Resource already exists");
        }

        match error {
            sea_orm::DbErr::RecordNotFound(record) => Self::new(
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                &format!("Record not found: {}", record),
            ),
            sea_orm::DbErr::Conn(connection_err) => {
                tracing::error!("Database connection error: {:?}", connection_err);
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Database service unavailable",
                )
            }
            _ => {
                tracing::error!("Database error: {:?}", error);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_SERVER_ERROR",
                    "Database error occurred",
                )
            }
        }
    }
}

/// Create an unauthorized error (401)
pub fn unauthorized(message: Option<&str>) -> ApiError {
    let msg = message.unwrap_or("Authentication required");
    ApiError::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
}

/// Create a forbidden error (403)
pub fn forbidden(message: Option<&str>) -> ApiError {
    let msg = message.unwrap_or("Insufficient permissions");
    ApiError::new(StatusCode::FORBIDDEN, "FORBIDDEN", msg)
}

/// Create a validation error with field details
pub fn validation_error(message: &str, field_errors: serde_json::Value) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message).with_details(field_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_api_error_basic() {
        let error = ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_FAILED",
            "Test error message",
        );

        assert_eq!(error.code, Box::from("VALIDATION_FAILED"));
        assert_eq!(error.message, Box::from("Test error message"));
        assert_eq!(error.details, None);
    }

    #[test]
    fn test_api_error_with_details() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Test error message")
            .with_details(json!({"field": "value"}));

        assert_eq!(error.details, Some(Box::new(json!({"field": "value"}))));
    }

    #[test]
    fn test_content_type_header() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, "VALIDATION_FAILED", "Test error");

        let response = error.into_response();

        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/problem+json"
        );
    }

    #[test]
    fn test_status_code_preservation() {
        let error = ApiError::new(StatusCode::CONFLICT, "CONFLICT", "Resource already exists");

        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_trace_id_generation() {
        let error = ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            "Test error",
        );

        assert!(error.trace_id.starts_with("corr-"));
        assert_eq!(error.trace_id.len(), 13); // "corr-" + 8 chars
    }

    #[test]
    fn test_database_error_mapping() {
        let db_error = sea_orm::DbErr::RecordNotFound("test_record".to_string());
        let api_error: ApiError = db_error.into();

        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.code, Box::from("NOT_FOUND"));
        assert!(api_error.message.contains("test_record"));
    }

    #[test]
    fn test_service_error_status_mapping() {
        let cases: Vec<(ServiceError, StatusCode, &str)> = vec![
            (
                ServiceError::not_found("Stay"),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ServiceError::CrossTenant,
                StatusCode::FORBIDDEN,
                "CROSS_TENANT",
            ),
            (
                ServiceError::Conflict("duplicate room number".to_string()),
                StatusCode::CONFLICT,
                "CONFLICT",
            ),
            (
                ServiceError::in_use("RoomType", "rooms"),
                StatusCode::CONFLICT,
                "IN_USE",
            ),
            (
                ServiceError::InvalidState {
                    from: "Completed".to_string(),
                    to: "Active".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "INVALID_STATE",
            ),
            (
                ServiceError::Validation("name must not be empty".to_string()),
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
            ),
            (
                ServiceError::NoTenantContext,
                StatusCode::UNAUTHORIZED,
                "NO_TENANT_CONTEXT",
            ),
        ];

        for (service_error, status, code) in cases {
            let api_error: ApiError = service_error.into();
            assert_eq!(api_error.status, status);
            assert_eq!(api_error.code.as_ref(), code);
        }
    }

    #[test]
    fn test_gateway_error_conversion() {
        let error: ServiceError = GatewayError::NoTenantContext.into();
        assert!(matches!(error, ServiceError::NoTenantContext));

        let error: ServiceError = GatewayError::CrossTenantWrite { id: None }.into();
        assert!(matches!(error, ServiceError::CrossTenant));
    }

    #[test]
    fn test_auth_error_helpers() {
        let auth_error = unauthorized(None);
        assert_eq!(auth_error.status, StatusCode::UNAUTHORIZED);
        assert_eq!(auth_error.code, Box::from("UNAUTHORIZED"));
        assert_eq!(auth_error.message, Box::from("Authentication required"));

        let custom_auth_error = unauthorized(Some("Invalid token"));
        assert_eq!(custom_auth_error.message, Box::from("Invalid token"));

        let forbidden_error = forbidden(None);
        assert_eq!(forbidden_error.status, StatusCode::FORBIDDEN);
        assert_eq!(forbidden_error.code, Box::from("FORBIDDEN"));
    }

    #[test]
    fn test_validation_error_with_details() {
        let field_errors = json!({
            "name": "Name is required",
            "email": "Invalid email format"
        });

        let validation_error = validation_error("Validation failed", field_errors.clone());

        assert_eq!(validation_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation_error.code, Box::from("VALIDATION_FAILED"));
        assert_eq!(validation_error.details, Some(Box::new(field_errors)));
    }
}
