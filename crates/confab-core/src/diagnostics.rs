//! Connectivity smoke tests for the settings/diagnostics view.
//!
//! Two probes: invoke the agent runtime with a fixed test message, and list
//! sessions for a fixed test actor against the memory store. Both return
//! the underlying error so the UI can show a reason next to the pass/fail
//! indicator.

use uuid::Uuid;

use confab_types::error::RuntimeError;

use crate::memory::store::MemoryStore;
use crate::runtime::invoke::{AgentRuntime, InvokeRequest};

pub const PROBE_PROMPT: &str = "Hello, this is a connection test.";
pub const PROBE_ACTOR_ID: &str = "test_user";
pub const PROBE_SESSION_ID: &str = "connection_test";

/// Smoke-test the agent runtime with a throwaway invocation.
pub async fn probe_runtime<R: AgentRuntime>(
    runtime: &R,
    qualifier: &str,
) -> Result<(), RuntimeError> {
    let request = InvokeRequest {
        prompt: PROBE_PROMPT.to_string(),
        actor_id: PROBE_ACTOR_ID.to_string(),
        session_id: PROBE_SESSION_ID.to_string(),
        runtime_session_id: format!("test_connection_{}", Uuid::new_v4().simple()),
        qualifier: qualifier.to_string(),
    };

    runtime.invoke(&request).await.map(|_| ())
}

/// Smoke-test memory access by listing sessions for the test actor.
pub async fn probe_memory<M: MemoryStore>(store: &M) -> Result<(), RuntimeError> {
    store.list_sessions(PROBE_ACTOR_ID).await.map(|_| ())
}
