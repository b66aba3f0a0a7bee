//! Remote memory store types: session summaries and transcript events.
//!
//! The memory store records conversation history server-side. Locally we
//! only model the read shapes: summaries returned by the session list, raw
//! recorded events, and the parsed entries the transcript viewer displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ChatRole;

/// Summary of one recorded session, as returned by the remote session list.
///
/// Timestamps are optional -- the remote store may omit them, in which case
/// the UI shows `Unknown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl SessionSummary {
    /// Abbreviated id for list display (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .session_id
            .char_indices()
            .nth(8)
            .map_or(self.session_id.len(), |(i, _)| i);
        &self.session_id[..end]
    }
}

/// One raw recorded event from the memory store.
///
/// The payload is kept as an untyped JSON value: its nested shape varies by
/// event kind and SDK version, and parsing it is allowed to fail per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEvent {
    #[serde(default)]
    pub event_id: Option<String>,
    pub payload: serde_json::Value,
}

/// A parsed unit of transcript history, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TranscriptEntry {
    /// A user or assistant turn with displayable text.
    Message { role: ChatRole, text: String },
    /// An event whose payload could not be parsed into the expected shape.
    /// Rendering of surrounding entries continues.
    Unparsed { reason: String },
}
