//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use confab_types::error::RuntimeError;

/// Application-level error that maps to HTTP responses.
///
/// Chat traffic never produces these -- the dispatch endpoint surfaces its
/// failures as reply text, matching the original entrypoint. This type
/// covers the session browser and settings endpoints.
#[derive(Debug)]
pub enum AppError {
    /// Remote memory store or runtime call failure.
    Remote(RuntimeError),
    /// Validation error.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<RuntimeError> for AppError {
    fn from(e: RuntimeError) -> Self {
        AppError::Remote(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Remote(RuntimeError::Transport(msg)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Remote(RuntimeError::Upstream { status, message }) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
                format!("status {status}: {message}"),
            ),
            AppError::Remote(RuntimeError::Deserialization(msg)) => (
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_PARSE_ERROR",
                msg.clone(),
            ),
            AppError::Remote(RuntimeError::Unconfigured(msg)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "NOT_CONFIGURED",
                msg.clone(),
            ),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}
