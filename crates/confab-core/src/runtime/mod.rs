//! Remote agent runtime port and the dispatch path built on it.

pub mod dispatch;
pub mod handle;
pub mod invoke;
pub mod registry;

pub use dispatch::{DispatchPayload, Dispatcher, ERROR_MARKER};
pub use handle::AgentHandle;
pub use invoke::{AgentRuntime, InvokeRequest};
pub use registry::HandleRegistry;
