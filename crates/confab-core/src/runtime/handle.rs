//! Per-session agent handle.
//!
//! An [`AgentHandle`] binds the remote runtime client to one (actor,
//! session) pair. Construction wires the invocation context -- it validates
//! that the runtime's agent configuration (memory store, model) is present
//! and mints a fresh runtime-session id. A construction failure propagates
//! to the caller and nothing is cached. There is no closing state: handles
//! live until the owning registry is dropped at process exit.

use std::sync::Arc;

use uuid::Uuid;

use confab_types::chat::SessionKey;
use confab_types::config::RuntimeSettings;
use confab_types::error::DispatchError;

use crate::runtime::invoke::{AgentRuntime, InvokeRequest};

/// A configured client for one conversation, ready to accept messages.
pub struct AgentHandle<R: AgentRuntime> {
    runtime: Arc<R>,
    key: SessionKey,
    runtime_session_id: String,
    qualifier: String,
    memory_id: String,
    model_id: String,
}

impl<R: AgentRuntime> AgentHandle<R> {
    /// Wire a handle for `key`.
    ///
    /// Fails if the agent's required configuration (memory id, model id) is
    /// absent; the error names the missing setting.
    pub fn new(
        runtime: Arc<R>,
        settings: &RuntimeSettings,
        key: SessionKey,
    ) -> Result<Self, DispatchError> {
        let memory_id = settings
            .require_memory_id()
            .map_err(|e| DispatchError::Init(e.to_string()))?
            .to_string();
        let model_id = settings
            .require_model_id()
            .map_err(|e| DispatchError::Init(e.to_string()))?
            .to_string();

        let runtime_session_id = format!("console_session_{}", Uuid::new_v4().simple());

        tracing::info!(key = %key, runtime_session_id = %runtime_session_id, "Agent handle created");

        Ok(Self {
            runtime,
            key,
            runtime_session_id,
            qualifier: settings.qualifier().to_string(),
            memory_id,
            model_id,
        })
    }

    /// Forward a message and return the reply text verbatim.
    pub async fn send(&self, message: &str) -> Result<String, DispatchError> {
        let request = InvokeRequest {
            prompt: message.to_string(),
            actor_id: self.key.actor_id.clone(),
            session_id: self.key.session_id.clone(),
            runtime_session_id: self.runtime_session_id.clone(),
            qualifier: self.qualifier.clone(),
        };

        Ok(self.runtime.invoke(&request).await?)
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    /// Wiring summary for the chat UI and diagnostics.
    pub fn session_info(&self) -> serde_json::Value {
        serde_json::json!({
            "actor_id": self.key.actor_id,
            "session_id": self.key.session_id,
            "runtime_session_id": self.runtime_session_id,
            "memory_id": self.memory_id,
            "model_id": self.model_id,
        })
    }
}

impl<R: AgentRuntime> std::fmt::Debug for AgentHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentHandle")
            .field("key", &self.key)
            .field("runtime_session_id", &self.runtime_session_id)
            .field("qualifier", &self.qualifier)
            .field("memory_id", &self.memory_id)
            .field("model_id", &self.model_id)
            .finish()
    }
}
