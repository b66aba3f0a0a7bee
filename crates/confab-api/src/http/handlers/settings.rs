//! Settings and diagnostics HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/v1/settings               - Redacted settings snapshot + env check
//! - POST /api/v1/settings/test-runtime  - Runtime connectivity smoke test
//! - POST /api/v1/settings/test-memory   - Memory store connectivity smoke test

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use confab_core::diagnostics::{probe_memory, probe_runtime};

use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Outcome of one connectivity smoke test.
#[derive(Debug, Serialize)]
pub struct ProbeResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeResult {
    fn from_outcome(outcome: Result<(), confab_types::error::RuntimeError>) -> Self {
        match outcome {
            Ok(()) => Self {
                ok: true,
                error: None,
            },
            Err(e) => Self {
                ok: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// GET /api/v1/settings - Redacted configuration snapshot plus the
/// per-variable environment check.
pub async fn get_settings(
    State(state): State<AppState>,
) -> Json<ApiResponse<serde_json::Value>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let body = serde_json::json!({
        "settings": state.settings.snapshot(),
        "environment": state.settings.check(),
        "active_handles": state.dispatcher.registry().len(),
    });

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(body, request_id, elapsed)
        .with_link("self", "/api/v1/settings");

    Json(resp)
}

/// POST /api/v1/settings/test-runtime - Invoke the runtime with a test message.
pub async fn test_runtime(State(state): State<AppState>) -> Json<ApiResponse<ProbeResult>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let outcome = probe_runtime(&*state.runtime, state.settings.qualifier()).await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "Runtime connection test failed");
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        ProbeResult::from_outcome(outcome),
        request_id,
        elapsed,
    ))
}

/// POST /api/v1/settings/test-memory - List sessions for the test actor.
pub async fn test_memory(State(state): State<AppState>) -> Json<ApiResponse<ProbeResult>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let outcome = probe_memory(state.memory.store()).await;
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, "Memory access test failed");
    }

    let elapsed = start.elapsed().as_millis() as u64;
    Json(ApiResponse::success(
        ProbeResult::from_outcome(outcome),
        request_id,
        elapsed,
    ))
}
