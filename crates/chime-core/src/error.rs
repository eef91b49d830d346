use thiserror::Error;

/// Errors produced by the shared foundation (config and settings I/O).
///
/// The filter and dispatcher deliberately have no error type of their own:
/// bad input data becomes a per-candidate outcome, delivery faults become a
/// per-notification outcome.
#[derive(Debug, Error)]
pub enum ChimeError {
    /// Process configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The settings document (or another payload) failed to (de)serialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem access to the settings document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChimeError>;
