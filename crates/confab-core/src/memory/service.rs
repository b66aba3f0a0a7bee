//! Memory query service: session lists and parsed transcripts.
//!
//! Thin orchestration over a [`MemoryStore`]: list summaries for an actor,
//! or fetch a session's events and parse them into display entries.
//! Failures surface as structured [`RuntimeError`]s; the CLI and HTTP
//! boundaries convert them to an empty collection plus a user-visible
//! error message.

use confab_types::error::RuntimeError;
use confab_types::memory::{SessionSummary, TranscriptEntry, TranscriptEvent};

use crate::memory::store::MemoryStore;
use crate::memory::transcript::parse_events;

pub struct MemoryService<M: MemoryStore> {
    store: M,
}

impl<M: MemoryStore> MemoryService<M> {
    pub fn new(store: M) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &M {
        &self.store
    }

    /// Session summaries for an actor, in whatever order the store returns.
    pub async fn list_sessions(
        &self,
        actor_id: &str,
    ) -> Result<Vec<SessionSummary>, RuntimeError> {
        self.store.list_sessions(actor_id).await
    }

    /// Raw recorded events for one session.
    pub async fn list_events(
        &self,
        actor_id: &str,
        session_id: &str,
    ) -> Result<Vec<TranscriptEvent>, RuntimeError> {
        self.store.list_events(actor_id, session_id).await
    }

    /// Parsed transcript for one session.
    ///
    /// Malformed events degrade to per-entry placeholders; only the remote
    /// call itself can fail.
    pub async fn transcript(
        &self,
        actor_id: &str,
        session_id: &str,
    ) -> Result<Vec<TranscriptEntry>, RuntimeError> {
        let events = self.store.list_events(actor_id, session_id).await?;
        tracing::debug!(
            actor_id,
            session_id,
            events = events.len(),
            "Parsing transcript"
        );
        Ok(parse_events(&events))
    }
}
