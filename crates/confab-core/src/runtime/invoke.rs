//! AgentRuntime trait definition.
//!
//! The single operation the hosted agent platform exposes for conversation:
//! send a message, get the reply text. Uses native async fn in traits
//! (RPITIT, Rust 2024 edition); the concrete HTTP client lives in
//! `confab-infra`.

use confab_types::error::RuntimeError;

/// One invocation of the hosted agent runtime.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// The user message to forward.
    pub prompt: String,
    /// Actor the conversation belongs to.
    pub actor_id: String,
    /// Memory session the runtime records the exchange under.
    pub session_id: String,
    /// Process-side invocation session id, sent as a request header.
    pub runtime_session_id: String,
    /// Runtime endpoint version selector.
    pub qualifier: String,
}

/// Port to the hosted conversational-agent runtime.
pub trait AgentRuntime: Send + Sync {
    /// Forward a message and return the reply text verbatim.
    fn invoke(
        &self,
        request: &InvokeRequest,
    ) -> impl std::future::Future<Output = Result<String, RuntimeError>> + Send;
}
