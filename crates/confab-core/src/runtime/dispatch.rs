//! Request dispatch shim.
//!
//! The entrypoint for chat traffic. Validates the incoming payload, resolves
//! the per-session agent handle (constructing on first reference), forwards
//! the message, and returns the reply text. `dispatch` surfaces structured
//! [`DispatchError`] kinds; `dispatch_text` is the text boundary that
//! converts them to the user-visible strings, including the fixed
//! `Error processing request: ` marker for non-validation failures.

use std::sync::Arc;

use serde::Deserialize;

use confab_types::chat::{DEFAULT_ACTOR_ID, SessionKey};
use confab_types::config::RuntimeSettings;
use confab_types::error::DispatchError;

use crate::runtime::handle::AgentHandle;
use crate::runtime::invoke::AgentRuntime;
use crate::runtime::registry::HandleRegistry;

/// Prefix of every non-validation failure surfaced as text.
pub const ERROR_MARKER: &str = "Error processing request: ";

/// Incoming chat payload.
///
/// The input text is `prompt`, falling back to `message`; whitespace-only
/// values count as absent. The actor id defaults to `default_user`; the
/// session id is mandatory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchPayload {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl DispatchPayload {
    fn input_text(&self) -> Option<&str> {
        self.prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.message.as_deref().filter(|s| !s.trim().is_empty()))
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref().filter(|s| !s.trim().is_empty())
    }

    fn actor_id(&self) -> &str {
        self.actor_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_ACTOR_ID)
    }
}

/// Validates payloads and forwards messages through cached agent handles.
pub struct Dispatcher<R: AgentRuntime> {
    runtime: Arc<R>,
    settings: Arc<RuntimeSettings>,
    registry: HandleRegistry<R>,
}

impl<R: AgentRuntime> Dispatcher<R> {
    pub fn new(runtime: Arc<R>, settings: Arc<RuntimeSettings>) -> Self {
        Self {
            runtime,
            settings,
            registry: HandleRegistry::new(),
        }
    }

    pub fn settings(&self) -> &RuntimeSettings {
        &self.settings
    }

    /// The handle registry, exposed for diagnostics (live handle count).
    pub fn registry(&self) -> &HandleRegistry<R> {
        &self.registry
    }

    /// Dispatch a payload, returning the reply text or a structured error.
    ///
    /// Validation failures never contact the remote service.
    pub async fn dispatch(&self, payload: &DispatchPayload) -> Result<String, DispatchError> {
        let input = payload.input_text().ok_or(DispatchError::EmptyMessage)?;
        let session_id = payload.session_id().ok_or(DispatchError::MissingSessionId)?;
        let key = SessionKey::new(payload.actor_id(), session_id);

        tracing::debug!(key = %key, "Dispatching message");

        let handle = self.registry.get_or_create(key.clone(), || {
            AgentHandle::new(Arc::clone(&self.runtime), &self.settings, key)
        })?;

        handle.send(input).await
    }

    /// Text boundary: the reply verbatim, or the user-visible error string.
    pub async fn dispatch_text(&self, payload: &DispatchPayload) -> String {
        match self.dispatch(payload).await {
            Ok(reply) => reply,
            Err(e) if e.is_validation() => format!("Error: {e}"),
            Err(e) => {
                tracing::warn!(error = %e, "Dispatch failed");
                format!("{ERROR_MARKER}{e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use confab_types::error::RuntimeError;

    use crate::runtime::invoke::InvokeRequest;

    /// Counts invocations; optionally fails every call.
    struct CountingRuntime {
        calls: AtomicUsize,
        fail_with: Option<fn() -> RuntimeError>,
    }

    impl CountingRuntime {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(f: fn() -> RuntimeError) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(f),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AgentRuntime for CountingRuntime {
        async fn invoke(&self, request: &InvokeRequest) -> Result<String, RuntimeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(f) => Err(f()),
                None => Ok(format!("reply to {}", request.prompt)),
            }
        }
    }

    fn settings() -> Arc<RuntimeSettings> {
        Arc::new(RuntimeSettings {
            memory_id: Some("mem-1".into()),
            model_id: Some("model-1".into()),
            ..Default::default()
        })
    }

    fn payload(message: &str, session: &str) -> DispatchPayload {
        DispatchPayload {
            prompt: Some(message.to_string()),
            session_id: Some(session.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_message_never_contacts_runtime() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let payload = DispatchPayload {
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let err = dispatcher.dispatch(&payload).await.unwrap_err();
        assert!(matches!(err, DispatchError::EmptyMessage));
        assert_eq!(runtime.calls(), 0);

        let text = dispatcher.dispatch_text(&payload).await;
        assert_eq!(text, "Error: No input message provided");
        assert_eq!(runtime.calls(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_message_counts_as_missing() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let err = dispatcher.dispatch(&payload("   ", "s1")).await.unwrap_err();
        assert!(matches!(err, DispatchError::EmptyMessage));
        assert_eq!(runtime.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_session_never_contacts_runtime() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let payload = DispatchPayload {
            prompt: Some("hello".into()),
            ..Default::default()
        };
        let err = dispatcher.dispatch(&payload).await.unwrap_err();
        assert!(matches!(err, DispatchError::MissingSessionId));
        assert_eq!(runtime.calls(), 0);

        let text = dispatcher.dispatch_text(&payload).await;
        assert_eq!(text, "Error: session_id is required");
    }

    #[tokio::test]
    async fn test_message_field_is_accepted_as_fallback() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let payload = DispatchPayload {
            message: Some("via message field".into()),
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let reply = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(reply, "reply to via message field");
    }

    #[tokio::test]
    async fn test_prompt_wins_over_message() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let payload = DispatchPayload {
            prompt: Some("from prompt".into()),
            message: Some("from message".into()),
            session_id: Some("s1".into()),
            ..Default::default()
        };
        let reply = dispatcher.dispatch(&payload).await.unwrap();
        assert_eq!(reply, "reply to from prompt");
    }

    #[tokio::test]
    async fn test_same_key_reuses_handle() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        dispatcher.dispatch(&payload("one", "s1")).await.unwrap();
        dispatcher.dispatch(&payload("two", "s1")).await.unwrap();

        assert_eq!(dispatcher.registry().len(), 1);
        assert_eq!(runtime.calls(), 2);
    }

    #[tokio::test]
    async fn test_distinct_actors_get_distinct_handles() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let mut for_alice = payload("hi", "s1");
        for_alice.actor_id = Some("alice".into());
        let mut for_bob = payload("hi", "s1");
        for_bob.actor_id = Some("bob".into());

        dispatcher.dispatch(&for_alice).await.unwrap();
        dispatcher.dispatch(&for_bob).await.unwrap();

        assert_eq!(dispatcher.registry().len(), 2);
    }

    #[tokio::test]
    async fn test_default_actor_is_applied() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        dispatcher.dispatch(&payload("hi", "s1")).await.unwrap();
        assert!(
            dispatcher
                .registry()
                .contains(&SessionKey::new(DEFAULT_ACTOR_ID, "s1"))
        );
    }

    #[tokio::test]
    async fn test_runtime_failure_becomes_marker_string() {
        let runtime = Arc::new(CountingRuntime::failing(|| RuntimeError::Upstream {
            status: 500,
            message: "internal failure".into(),
        }));
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let text = dispatcher.dispatch_text(&payload("hi", "s1")).await;
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("500"));
    }

    #[tokio::test]
    async fn test_unreachable_runtime_becomes_marker_string() {
        let runtime = Arc::new(CountingRuntime::failing(|| {
            RuntimeError::Transport("connection refused".into())
        }));
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let text = dispatcher.dispatch_text(&payload("hi", "s1")).await;
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_init_failure_is_not_cached() {
        let runtime = Arc::new(CountingRuntime::ok());
        // No memory id: handle construction fails.
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), Arc::new(RuntimeSettings::default()));

        let text = dispatcher.dispatch_text(&payload("hi", "s1")).await;
        assert!(text.starts_with(ERROR_MARKER));
        assert!(text.contains("MEMORY_ID"));
        assert!(dispatcher.registry().is_empty());
        assert_eq!(runtime.calls(), 0);
    }

    #[tokio::test]
    async fn test_successful_reply_is_returned_verbatim() {
        let runtime = Arc::new(CountingRuntime::ok());
        let dispatcher = Dispatcher::new(Arc::clone(&runtime), settings());

        let text = dispatcher.dispatch_text(&payload("hello", "s1")).await;
        assert_eq!(text, "reply to hello");
    }
}
