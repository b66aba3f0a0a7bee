//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST
//! API. Services are generic over the runtime/memory-store traits, but
//! AppState pins them to the AgentCore HTTP client.

use std::path::PathBuf;
use std::sync::Arc;

use confab_core::memory::MemoryService;
use confab_core::runtime::Dispatcher;
use confab_infra::agentcore::AgentCoreClient;
use confab_infra::config::{load_settings, resolve_data_dir};
use confab_types::config::RuntimeSettings;

/// Concrete type aliases for the service generics pinned to the AgentCore client.
pub type ConcreteDispatcher = Dispatcher<AgentCoreClient>;
pub type ConcreteMemoryService = MemoryService<AgentCoreClient>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    /// The invoke client, shared with the dispatcher; kept here so the
    /// diagnostics probes can reach it directly.
    pub runtime: Arc<AgentCoreClient>,
    pub dispatcher: Arc<ConcreteDispatcher>,
    pub memory: Arc<ConcreteMemoryService>,
    pub settings: Arc<RuntimeSettings>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state from the data directory and environment.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let settings = load_settings(&data_dir).await;

        // CONFAB_ENDPOINT points the client at a local stack instead of the
        // regional endpoint.
        let endpoint = std::env::var("CONFAB_ENDPOINT").ok();
        Ok(Self::from_settings(settings, endpoint.as_deref(), data_dir))
    }

    /// Wire services from explicit settings (tests, local stacks).
    pub fn from_settings(
        settings: RuntimeSettings,
        endpoint: Option<&str>,
        data_dir: PathBuf,
    ) -> Self {
        let settings = Arc::new(settings);

        let make_client = || match endpoint {
            Some(endpoint) => AgentCoreClient::with_endpoint(&settings, endpoint),
            None => AgentCoreClient::new(&settings),
        };

        let runtime = Arc::new(make_client());
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&runtime),
            Arc::clone(&settings),
        ));
        // The memory service owns a separate client instance; the dispatcher
        // keeps the shared one.
        let memory = Arc::new(MemoryService::new(make_client()));

        Self {
            runtime,
            dispatcher,
            memory,
            settings,
            data_dir,
        }
    }
}
