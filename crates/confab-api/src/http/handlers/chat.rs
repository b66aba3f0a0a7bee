//! Chat dispatch endpoint.
//!
//! POST /api/v1/chat
//!
//! The HTTP face of the dispatch shim. The reply is always delivered as
//! text in the `data.reply` message -- validation and upstream failures
//! surface as the entrypoint's user-visible error strings, exactly as the
//! original returned them in place of a reply.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use uuid::Uuid;

use confab_core::runtime::DispatchPayload;
use confab_types::chat::{ChatMessage, ChatRole, DEFAULT_ACTOR_ID};

use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Response payload for the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub actor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub reply: ChatMessage,
}

/// POST /api/v1/chat -- dispatch a message and return the reply text.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<DispatchPayload>,
) -> Json<ApiResponse<ChatReply>> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let actor_id = payload
        .actor_id
        .clone()
        .unwrap_or_else(|| DEFAULT_ACTOR_ID.to_string());
    let session_id = payload.session_id.clone();

    let reply_text = state.dispatcher.dispatch_text(&payload).await;
    let reply = ChatMessage::now(ChatRole::Assistant, reply_text);

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(
        ChatReply {
            actor_id,
            session_id,
            reply,
        },
        request_id,
        elapsed,
    )
    .with_link("self", "/api/v1/chat");

    Json(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use wiremock::matchers::{method, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use confab_types::config::RuntimeSettings;

    fn test_state(endpoint: &str) -> AppState {
        let settings = RuntimeSettings {
            agent_runtime_arn: Some(
                "arn:aws:bedrock-agentcore:us-east-1:123456789012:runtime/demo".into(),
            ),
            memory_id: Some("mem-1".into()),
            model_id: Some("anthropic.claude-sonnet-4-20250514-v1:0".into()),
            ..Default::default()
        };
        AppState::from_settings(settings, Some(endpoint), PathBuf::from("/tmp"))
    }

    #[tokio::test]
    async fn test_missing_message_returns_error_text_not_status() {
        // Unreachable endpoint: validation must fail before any request.
        let state = test_state("http://127.0.0.1:1");

        let payload = DispatchPayload {
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let Json(resp) = chat(State(state), Json(payload)).await;

        let reply = resp.data.unwrap().reply;
        assert_eq!(reply.content, "Error: No input message provided");
    }

    #[tokio::test]
    async fn test_happy_path_returns_reply_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/runtimes/.+/invocations$"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Hello from the agent"))
            .expect(1)
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let payload = DispatchPayload {
            prompt: Some("hi".into()),
            actor_id: Some("alice".into()),
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let Json(resp) = chat(State(state), Json(payload)).await;

        let data = resp.data.unwrap();
        assert_eq!(data.actor_id, "alice");
        assert_eq!(data.session_id.as_deref(), Some("s1"));
        assert_eq!(data.reply.content, "Hello from the agent");
        assert_eq!(data.reply.role, ChatRole::Assistant);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_as_marker_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/runtimes/.+/invocations$"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let state = test_state(&server.uri());
        let payload = DispatchPayload {
            prompt: Some("hi".into()),
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let Json(resp) = chat(State(state), Json(payload)).await;

        let reply = resp.data.unwrap().reply;
        assert!(
            reply
                .content
                .starts_with(confab_core::runtime::ERROR_MARKER)
        );
    }
}
