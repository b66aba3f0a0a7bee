use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use confab_core::memory::MemoryStore;
use confab_core::runtime::{AgentRuntime, InvokeRequest};
use confab_infra::agentcore::AgentCoreClient;
use confab_types::config::RuntimeSettings;
use confab_types::error::RuntimeError;

const RUNTIME_ARN: &str = "arn:aws:bedrock-agentcore:us-east-1:123456789012:runtime/demo-agent";

fn test_settings() -> RuntimeSettings {
    RuntimeSettings {
        agent_runtime_arn: Some(RUNTIME_ARN.to_string()),
        api_key: Some(SecretString::from("test-token")),
        memory_id: Some("mem-1".to_string()),
        model_id: Some("anthropic.claude-sonnet-4-20250514-v1:0".to_string()),
        ..Default::default()
    }
}

fn invoke_request(prompt: &str) -> InvokeRequest {
    InvokeRequest {
        prompt: prompt.to_string(),
        actor_id: "default_user".to_string(),
        session_id: "session-1".to_string(),
        runtime_session_id: "console_session_abc123".to_string(),
        qualifier: "DEFAULT".to_string(),
    }
}

#[tokio::test]
async fn invoke_happy_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/runtimes/.+/invocations$"))
        .and(query_param("qualifier", "DEFAULT"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header(
            "X-Amzn-Bedrock-AgentCore-Runtime-Session-Id",
            "console_session_abc123",
        ))
        .and(body_json(json!({
            "prompt": "hello",
            "actor_id": "default_user",
            "session_id": "session-1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hi! How can I help?"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let reply = client
        .invoke(&invoke_request("hello"))
        .await
        .expect("invoke should succeed");

    assert_eq!(reply, "Hi! How can I help?");
}

#[tokio::test]
async fn invoke_non_success_status_maps_to_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/runtimes/.+/invocations$"))
        .respond_with(ResponseTemplate::new(503).set_body_string("throttled"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let err = client
        .invoke(&invoke_request("hello"))
        .await
        .expect_err("non-200 should fail");

    assert!(
        matches!(err, RuntimeError::Upstream { status: 503, ref message } if message == "throttled")
    );
}

#[tokio::test]
async fn invoke_without_runtime_arn_fails_without_network() {
    let settings = RuntimeSettings {
        memory_id: Some("mem-1".to_string()),
        ..Default::default()
    };
    // The endpoint is unreachable on purpose: the call must fail before any request.
    let client = AgentCoreClient::with_endpoint(&settings, "http://127.0.0.1:1");

    let err = client
        .invoke(&invoke_request("hello"))
        .await
        .expect_err("missing ARN should fail");

    assert!(matches!(err, RuntimeError::Unconfigured(msg) if msg.contains("AGENT_RUNTIME_ARN")));
}

#[tokio::test]
async fn invoke_unreachable_endpoint_maps_to_transport_error() {
    let client = AgentCoreClient::with_endpoint(&test_settings(), "http://127.0.0.1:1");

    let err = client
        .invoke(&invoke_request("hello"))
        .await
        .expect_err("connection should fail");

    assert!(matches!(err, RuntimeError::Transport(_)));
}

#[tokio::test]
async fn list_sessions_maps_summaries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memories/mem-1/actors/default_user/sessions"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessionSummaries": [
                {
                    "sessionId": "0b54fd5c-9e13-4a21-8a6f-1f2e3d4c5b6a",
                    "createdTime": "2026-03-01T10:00:00Z",
                    "lastUpdatedTime": "2026-03-01T10:05:00Z"
                },
                { "sessionId": "second-session" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let sessions = client
        .list_sessions("default_user")
        .await
        .expect("list should succeed");

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].short_id(), "0b54fd5c");
    assert!(sessions[0].created.is_some());
    assert!(sessions[1].created.is_none());
}

#[tokio::test]
async fn list_sessions_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memories/mem-1/actors/nobody/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionSummaries": [] })))
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let sessions = client.list_sessions("nobody").await.unwrap();
    assert!(sessions.is_empty());
}

#[tokio::test]
async fn list_sessions_without_memory_id_fails_without_network() {
    let settings = RuntimeSettings {
        agent_runtime_arn: Some(RUNTIME_ARN.to_string()),
        ..Default::default()
    };
    let client = AgentCoreClient::with_endpoint(&settings, "http://127.0.0.1:1");

    let err = client
        .list_sessions("default_user")
        .await
        .expect_err("missing memory id should fail");

    assert!(matches!(err, RuntimeError::Unconfigured(msg) if msg.contains("MEMORY_ID")));
}

#[tokio::test]
async fn list_sessions_error_status_maps_to_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memories/mem-1/actors/default_user/sessions"))
        .respond_with(ResponseTemplate::new(403).set_body_string("access denied"))
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let err = client.list_sessions("default_user").await.unwrap_err();

    assert!(matches!(err, RuntimeError::Upstream { status: 403, .. }));
}

#[tokio::test]
async fn list_sessions_malformed_body_maps_to_deserialization() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memories/mem-1/actors/default_user/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let err = client.list_sessions("default_user").await.unwrap_err();

    assert!(matches!(err, RuntimeError::Deserialization(_)));
}

#[tokio::test]
async fn list_events_returns_raw_payloads() {
    let server = MockServer::start().await;

    let inner = json!({
        "message": { "role": "user", "content": [ { "text": "remember me" } ] }
    });
    Mock::given(method("GET"))
        .and(path(
            "/memories/mem-1/actors/default_user/sessions/session-1/events",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "events": [
                {
                    "eventId": "ev-1",
                    "payload": [ { "conversational": { "content": { "text": inner.to_string() } } } ]
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentCoreClient::with_endpoint(&test_settings(), server.uri());
    let events = client
        .list_events("default_user", "session-1")
        .await
        .expect("list should succeed");

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id.as_deref(), Some("ev-1"));
    assert!(events[0].payload.is_array());

    // The nested payload parses end to end.
    let entries = confab_core::memory::transcript::parse_events(&events);
    assert_eq!(entries.len(), 1);
}
