//! CLI error types

use civic_lifecycle::LifecycleError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// HTTP client setup error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lifecycle operation failed; the view has already shown it
    #[error("{0}")]
    Lifecycle(#[from] LifecycleError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the user has already seen this error as a notice
    pub fn already_reported(&self) -> bool {
        matches!(self, CliError::Lifecycle(e) if !matches!(e, LifecycleError::Busy))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
