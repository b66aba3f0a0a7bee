//! Transcript event parsing.
//!
//! Recorded events arrive as nested JSON: the event payload is either a
//! message object or an array whose first element is one; the object nests
//! the actual turn under `conversational.content.text`, which is itself a
//! JSON document of the shape
//! `{"message": {"role": ..., "content": [ ... ]}}`.
//!
//! Parsing is per event: a malformed payload yields an
//! [`TranscriptEntry::Unparsed`] placeholder and surrounding events still
//! render. Events with roles other than user/assistant are skipped, as are
//! empty payloads.

use serde::Deserialize;
use serde_json::Value;

use confab_types::chat::ChatRole;
use confab_types::memory::{TranscriptEntry, TranscriptEvent};

#[derive(Debug, Deserialize)]
struct EventMessage {
    conversational: Conversational,
}

#[derive(Debug, Deserialize)]
struct Conversational {
    content: ContentText,
}

#[derive(Debug, Deserialize)]
struct ContentText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct RecordedTurn {
    message: RecordedMessage,
}

#[derive(Debug, Deserialize)]
struct RecordedMessage {
    role: String,
    #[serde(default)]
    content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "toolUse", default)]
    tool_use: Option<ToolUse>,
    #[serde(rename = "toolResult", default)]
    tool_result: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ToolUse {
    #[serde(default)]
    name: Option<String>,
}

/// Parse a batch of events into display entries.
///
/// Empty payloads and non-conversational roles are dropped; malformed
/// payloads become placeholders.
pub fn parse_events(events: &[TranscriptEvent]) -> Vec<TranscriptEntry> {
    events.iter().filter_map(parse_event).collect()
}

/// Parse one event. `None` means the event carries nothing to display.
pub fn parse_event(event: &TranscriptEvent) -> Option<TranscriptEntry> {
    if payload_is_empty(&event.payload) {
        return None;
    }

    let item = match &event.payload {
        Value::Array(items) => items.first()?,
        other => other,
    };

    let envelope: EventMessage = match serde_json::from_value(item.clone()) {
        Ok(envelope) => envelope,
        Err(e) => {
            return Some(TranscriptEntry::Unparsed {
                reason: format!("missing conversational content: {e}"),
            });
        }
    };

    let turn: RecordedTurn = match serde_json::from_str(&envelope.conversational.content.text) {
        Ok(turn) => turn,
        Err(e) => {
            return Some(TranscriptEntry::Unparsed {
                reason: format!("invalid message body: {e}"),
            });
        }
    };

    // Roles other than user/assistant carry nothing displayable.
    let role: ChatRole = turn.message.role.parse().ok()?;

    Some(TranscriptEntry::Message {
        role,
        text: display_text(&turn.message.content),
    })
}

fn payload_is_empty(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// The first recognizable content item wins: plain text, a tool-use tag,
/// or a tool-result tag. An entry with no recognizable item displays empty.
fn display_text(content: &[ContentItem]) -> String {
    for item in content {
        if let Some(text) = &item.text {
            return text.clone();
        }
        if let Some(tool_use) = &item.tool_use {
            let name = tool_use.name.as_deref().unwrap_or("unknown_tool");
            return format!("[Used tool: {name}]");
        }
        if item.tool_result.is_some() {
            return "[Tool result]".to_string();
        }
    }
    String::new()
}
