//! AgentCoreClient -- HTTP client for the AgentCore data plane.
//!
//! Sends requests to the data-plane endpoint
//! (`https://bedrock-agentcore.{region}.amazonaws.com`) using Bearer token
//! authentication. Invocations carry the runtime-session id as a request
//! header and the qualifier as a query parameter; the reply body is the
//! agent's response text. Non-success statuses map to application-level
//! upstream errors carrying the status and body text, not distinct error
//! types.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use confab_core::memory::MemoryStore;
use confab_core::runtime::{AgentRuntime, InvokeRequest};
use confab_types::config::RuntimeSettings;
use confab_types::error::RuntimeError;
use confab_types::memory::{SessionSummary, TranscriptEvent};

use super::types::{ListEventsResponse, ListSessionsResponse};

/// Request header carrying the process-side invocation session id.
const RUNTIME_SESSION_HEADER: &str = "X-Amzn-Bedrock-AgentCore-Runtime-Session-Id";

/// Client for the AgentCore runtime and memory data-plane APIs.
pub struct AgentCoreClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    runtime_arn: Option<String>,
    memory_id: Option<String>,
}

impl AgentCoreClient {
    /// Create a client against the regional data-plane endpoint.
    pub fn new(settings: &RuntimeSettings) -> Self {
        let endpoint = format!("https://bedrock-agentcore.{}.amazonaws.com", settings.region());
        Self::with_endpoint(settings, endpoint)
    }

    /// Create a client against an explicit endpoint (tests, local stacks).
    pub fn with_endpoint(settings: &RuntimeSettings, endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            runtime_arn: settings.agent_runtime_arn.clone(),
            memory_id: settings.memory_id.clone(),
        }
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(
                "Authorization",
                format!("Bearer {}", key.expose_secret()),
            ),
            None => request,
        }
    }

    fn require_runtime_arn(&self) -> Result<&str, RuntimeError> {
        self.runtime_arn
            .as_deref()
            .ok_or_else(|| RuntimeError::Unconfigured("AGENT_RUNTIME_ARN is not set".to_string()))
    }

    fn require_memory_id(&self) -> Result<&str, RuntimeError> {
        self.memory_id
            .as_deref()
            .ok_or_else(|| RuntimeError::Unconfigured("MEMORY_ID is not set".to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RuntimeError> {
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| RuntimeError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, url = %url, "AgentCore API error response");
            return Err(RuntimeError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RuntimeError::Deserialization(format!("failed to parse response: {e}")))
    }
}

// AgentCoreClient intentionally does NOT derive Debug to prevent
// accidental exposure of internal state.

impl AgentRuntime for AgentCoreClient {
    async fn invoke(&self, request: &InvokeRequest) -> Result<String, RuntimeError> {
        let arn = self.require_runtime_arn()?;
        let url = format!(
            "{}/runtimes/{}/invocations",
            self.endpoint,
            escape_path_segment(arn)
        );

        tracing::debug!(url = %url, session_id = %request.session_id, "AgentCore invoke request");

        let payload = serde_json::json!({
            "prompt": request.prompt,
            "actor_id": request.actor_id,
            "session_id": request.session_id,
        });

        let response = self
            .authorize(self.client.post(&url))
            .query(&[("qualifier", request.qualifier.as_str())])
            .header(RUNTIME_SESSION_HEADER, &request.runtime_session_id)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RuntimeError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            tracing::warn!(status = %status, body = %body, url = %url, "AgentCore invoke error response");
            return Err(RuntimeError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}

impl MemoryStore for AgentCoreClient {
    async fn list_sessions(&self, actor_id: &str) -> Result<Vec<SessionSummary>, RuntimeError> {
        let memory_id = self.require_memory_id()?;
        let url = format!(
            "{}/memories/{}/actors/{}/sessions",
            self.endpoint,
            escape_path_segment(memory_id),
            escape_path_segment(actor_id)
        );

        let response: ListSessionsResponse = self.get_json(&url).await?;
        Ok(response
            .session_summaries
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn list_events(
        &self,
        actor_id: &str,
        session_id: &str,
    ) -> Result<Vec<TranscriptEvent>, RuntimeError> {
        let memory_id = self.require_memory_id()?;
        let url = format!(
            "{}/memories/{}/actors/{}/sessions/{}/events",
            self.endpoint,
            escape_path_segment(memory_id),
            escape_path_segment(actor_id),
            escape_path_segment(session_id)
        );

        let response: ListEventsResponse = self.get_json(&url).await?;
        Ok(response.events.into_iter().map(Into::into).collect())
    }
}

/// Percent-encode the characters an ARN or id can carry that would break a
/// URL path segment.
fn escape_path_segment(segment: &str) -> String {
    segment
        .replace('%', "%25")
        .replace(':', "%3A")
        .replace('/', "%2F")
}
