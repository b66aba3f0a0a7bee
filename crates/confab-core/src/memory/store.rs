//! MemoryStore trait definition.
//!
//! Two read operations against the remote memory store, keyed by actor and
//! session. Uses native async fn in traits (RPITIT, Rust 2024 edition);
//! the concrete HTTP client lives in `confab-infra`. No pagination beyond
//! what the remote API returns, no caching, no retries.

use confab_types::error::RuntimeError;
use confab_types::memory::{SessionSummary, TranscriptEvent};

/// Port to the remote memory store's read surface.
pub trait MemoryStore: Send + Sync {
    /// List recorded session summaries for an actor.
    fn list_sessions(
        &self,
        actor_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SessionSummary>, RuntimeError>> + Send;

    /// List recorded events for one (actor, session) pair.
    fn list_events(
        &self,
        actor_id: &str,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<TranscriptEvent>, RuntimeError>> + Send;
}
