//! Error types for the report lifecycle

use civic_types::RuleViolation;
use thiserror::Error;

/// A submission or transition payload that broke a field rule.
///
/// Raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ValidationError(#[from] pub RuleViolation);

impl ValidationError {
    pub fn violation(&self) -> &RuleViolation {
        &self.0
    }
}

/// Failure reported by a [`ReportStore`](crate::ReportStore) implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The request completed and the store refused it
    #[error("{message}")]
    Rejected {
        /// Transport status code, when there is one
        status: Option<u16>,
        message: String,
    },

    /// The request never completed or the answer could not be read
    #[error("Connectivity failure: {0}")]
    Connectivity(String),
}

impl StoreError {
    pub fn rejected(message: impl Into<String>) -> Self {
        StoreError::Rejected {
            status: None,
            message: message.into(),
        }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        StoreError::Rejected {
            status: Some(404),
            message: format!("{} not found", what),
        }
    }
}

/// Errors surfaced by lifecycle operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LifecycleError {
    /// Malformed input, caught locally
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The store answered and refused the operation
    #[error("{message}")]
    StoreRejection { status: Option<u16>, message: String },

    /// The store could not be reached
    #[error("Could not connect to the server")]
    Connectivity { detail: String },

    /// The current viewer may not change report status
    #[error("Only administrators can change report status")]
    NotPrivileged,

    /// The same action already has a request in flight
    #[error("Another request for this action is still in progress")]
    Busy,
}

impl From<StoreError> for LifecycleError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Rejected { status, message } => {
                LifecycleError::StoreRejection { status, message }
            }
            StoreError::Connectivity(detail) => LifecycleError::Connectivity { detail },
        }
    }
}

impl From<RuleViolation> for LifecycleError {
    fn from(violation: RuleViolation) -> Self {
        LifecycleError::Validation(ValidationError(violation))
    }
}

/// Result type alias for lifecycle operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;
