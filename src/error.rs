/// Centralized error types for review-lens using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the review-lens engine
#[derive(Error, Debug)]
pub enum LensError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to the persisted review store
///
/// These are recovered locally: a load failure leaves the index empty and a
/// save failure leaves the in-memory state authoritative for the session.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to load review store from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to save review store to '{path}': {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("Failed to parse review store file: {0}")]
    ParseFailed(String),
}

/// Errors surfaced by the external review-generation backend
///
/// None of these are retried; each is terminal for its request.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend executable not found at '{0}'")]
    ExecutableNotFound(String),

    #[error("Failed to encode review request: {0}")]
    MalformedRequest(String),

    #[error("Failed to decode review response: {0}")]
    MalformedResponse(String),

    #[error("Backend exited with status {code}: {stderr}")]
    Failed { code: i32, stderr: String },

    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("Backend I/O failure: {0}")]
    Io(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

// Conversion from anyhow::Error to LensError
impl From<anyhow::Error> for LensError {
    fn from(err: anyhow::Error) -> Self {
        LensError::Other(format!("{:#}", err))
    }
}

impl LensError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        LensError::Other(msg.into())
    }
}

impl BackendError {
    /// Short actionable hint for rendering the failure to a user
    pub fn hint(&self) -> &'static str {
        match self {
            BackendError::ExecutableNotFound(_) => {
                "install the review backend or set backend_path in the configuration"
            }
            BackendError::MalformedRequest(_) | BackendError::MalformedResponse(_) => {
                "update the review backend to a compatible version"
            }
            BackendError::QuotaExceeded(_) => "wait for the quota window to reset or switch API keys",
            BackendError::InvalidApiKey(_) => "check the configured API key",
            BackendError::Failed { .. } | BackendError::Io(_) => {
                "check the backend logs and your network connection"
            }
        }
    }

    /// True when fixing the failure requires a configuration change rather
    /// than a backend-side fix
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BackendError::ExecutableNotFound(_) | BackendError::InvalidApiKey(_)
        )
    }
}
