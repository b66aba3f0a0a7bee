//! Session-handle registry.
//!
//! A process-lifetime map from [`SessionKey`] to a shared [`AgentHandle`],
//! backed by `DashMap`. Entries are created on first reference and never
//! evicted. The entry API is atomic: concurrent first references to the
//! same new key construct exactly one handle, and a failed construction
//! caches nothing.
//!
//! Construction is synchronous and performs no I/O, so no shard lock is
//! ever held across an await. Handles are cloned out as `Arc`s -- never
//! hold a `DashMap` guard across await points.

use std::sync::Arc;

use dashmap::DashMap;

use confab_types::chat::SessionKey;
use confab_types::error::DispatchError;

use crate::runtime::handle::AgentHandle;
use crate::runtime::invoke::AgentRuntime;

pub struct HandleRegistry<R: AgentRuntime> {
    handles: DashMap<SessionKey, Arc<AgentHandle<R>>>,
}

impl<R: AgentRuntime> HandleRegistry<R> {
    pub fn new() -> Self {
        Self {
            handles: DashMap::new(),
        }
    }

    /// Look up the handle for `key`, constructing it on first reference.
    ///
    /// `construct` runs at most once per key across all concurrent callers.
    /// If it fails, the error propagates and the key stays absent, so a
    /// later call retries construction.
    pub fn get_or_create(
        &self,
        key: SessionKey,
        construct: impl FnOnce() -> Result<AgentHandle<R>, DispatchError>,
    ) -> Result<Arc<AgentHandle<R>>, DispatchError> {
        let entry = self
            .handles
            .entry(key)
            .or_try_insert_with(|| construct().map(Arc::new))?;
        Ok(Arc::clone(entry.value()))
    }

    /// Number of live handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, key: &SessionKey) -> bool {
        self.handles.contains_key(key)
    }
}

impl<R: AgentRuntime> Default for HandleRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
