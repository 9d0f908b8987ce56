//! Operator Types
//!
//! Error types shared by the lifecycle engine

use super::outcome::Outcome;
use super::services::ServiceError;
use thiserror::Error;

/// Operator errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OperatorError {
    /// The caller's cancellation token fired before an attempt was issued
    #[error("operation cancelled")]
    Cancelled,

    /// The control plane stayed busy for the whole retry budget
    #[error("timed out waiting for {resource} after {attempts} attempts: {last_error}")]
    Exhausted {
        resource: String,
        attempts: u32,
        last_error: String,
    },

    /// Unclassified error from the control plane, surfaced verbatim
    #[error(transparent)]
    Remote(#[from] ServiceError),

    #[error("Invalid resource spec: {0}")]
    InvalidSpec(String),
}

impl OperatorError {
    /// Outcome to report alongside this error. A failed mutation never changed anything.
    pub fn outcome(&self) -> Outcome {
        Outcome::NotChanged
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OperatorError::Cancelled)
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, OperatorError::Exhausted { .. })
    }
}

/// Result type for operator operations
pub type Result<T, E = OperatorError> = std::result::Result<T, E>;
