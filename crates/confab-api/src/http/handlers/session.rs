//! Session browser HTTP handlers.
//!
//! Endpoints:
//! - GET /api/v1/actors/{actor_id}/sessions                          - List recorded sessions
//! - GET /api/v1/actors/{actor_id}/sessions/{session_id}/transcript  - Parsed transcript

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use confab_types::memory::{SessionSummary, TranscriptEntry};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/actors/{actor_id}/sessions - List sessions for an actor.
pub async fn list_sessions(
    State(state): State<AppState>,
    Path(actor_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<SessionSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.memory.list_sessions(&actor_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(sessions, request_id, elapsed)
        .with_link("self", &format!("/api/v1/actors/{actor_id}/sessions"));

    Ok(Json(resp))
}

/// GET /api/v1/actors/{actor_id}/sessions/{session_id}/transcript -
/// Parsed transcript entries for one session.
///
/// Malformed events arrive as `unparsed` placeholder entries; only a failed
/// remote call produces an error response.
pub async fn get_transcript(
    State(state): State<AppState>,
    Path((actor_id, session_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<Vec<TranscriptEntry>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let entries = state.memory.transcript(&actor_id, &session_id).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(entries, request_id, elapsed)
        .with_link(
            "self",
            &format!("/api/v1/actors/{actor_id}/sessions/{session_id}/transcript"),
        )
        .with_link("sessions", &format!("/api/v1/actors/{actor_id}/sessions"));

    Ok(Json(resp))
}
