use thiserror::Error;

/// Errors from calls to the remote agent runtime or memory store.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The remote endpoint could not be reached (connect failure, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The remote service answered with a non-success status.
    #[error("status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Deserialization(String),

    /// A setting the call depends on has no value.
    #[error("{0}")]
    Unconfigured(String),
}

/// Error kinds surfaced by the dispatch shim.
///
/// Structured so callers can branch on the kind; the user-facing text of
/// each variant is preserved verbatim at the text boundary
/// (`Dispatcher::dispatch_text`).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No input message provided")]
    EmptyMessage,

    #[error("session_id is required")]
    MissingSessionId,

    #[error("failed to initialize agent: {0}")]
    Init(String),

    #[error("agent runtime unreachable: {0}")]
    Unavailable(String),

    #[error("agent runtime returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("could not interpret agent response: {0}")]
    Parse(String),
}

impl DispatchError {
    /// True for input-validation failures that never reach the remote service.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DispatchError::EmptyMessage | DispatchError::MissingSessionId
        )
    }
}

impl From<RuntimeError> for DispatchError {
    fn from(e: RuntimeError) -> Self {
        match e {
            RuntimeError::Transport(msg) => DispatchError::Unavailable(msg),
            RuntimeError::Upstream { status, message } => {
                DispatchError::Upstream { status, message }
            }
            RuntimeError::Deserialization(msg) => DispatchError::Parse(msg),
            RuntimeError::Unconfigured(msg) => DispatchError::Init(msg),
        }
    }
}

/// Errors from resolving runtime settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}
