//! Read-only queries against the remote memory store.

pub mod service;
pub mod store;
pub mod transcript;

pub use service::MemoryService;
pub use store::MemoryStore;
