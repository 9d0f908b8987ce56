//! Error types for the gke-lifecycle crate.

use crate::operator::{ComplianceViolation, OperatorError};
use thiserror::Error;

/// Result type alias for crate-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Lifecycle engine error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Security compliance violation
    #[error("Compliance violation: {0}")]
    Compliance(#[from] ComplianceViolation),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code used by the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Compliance(_) => 2,
            Error::Operator(OperatorError::Exhausted { .. }) => 3,
            Error::Config(_) => 78,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compliance_error_exit_code() {
        let err: Error = ComplianceViolation::AlphaFeaturesEnabled.into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("alpha features"));
    }

    #[test]
    fn test_exhausted_error_exit_code() {
        let err: Error = OperatorError::Exhausted {
            resource: "projects/p/locations/l/clusters/c".to_string(),
            attempts: 12,
            last_error: "busy".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), 3);
    }
}
