//! AgentCore data-plane HTTP client.
//!
//! One client implements both core ports: [`confab_core::runtime::AgentRuntime`]
//! (agent invocation) and [`confab_core::memory::MemoryStore`] (session and
//! event reads).

mod client;
mod types;

pub use client::AgentCoreClient;
