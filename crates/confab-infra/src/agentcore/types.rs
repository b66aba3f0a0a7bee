//! Wire types for the AgentCore data-plane responses.
//!
//! The remote API uses camelCase field names; these deserialize the
//! SDK-shaped responses and convert into the domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use confab_types::memory::{SessionSummary, TranscriptEvent};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListSessionsResponse {
    #[serde(default)]
    pub session_summaries: Vec<WireSessionSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSessionSummary {
    pub session_id: String,
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated_time: Option<DateTime<Utc>>,
}

impl From<WireSessionSummary> for SessionSummary {
    fn from(wire: WireSessionSummary) -> Self {
        SessionSummary {
            session_id: wire.session_id,
            created: wire.created_time,
            updated: wire.last_updated_time,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEventsResponse {
    #[serde(default)]
    pub events: Vec<WireEvent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl From<WireEvent> for TranscriptEvent {
    fn from(wire: WireEvent) -> Self {
        TranscriptEvent {
            event_id: wire.event_id,
            payload: wire.payload,
        }
    }
}
