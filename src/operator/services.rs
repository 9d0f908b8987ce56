//! GKE control-plane client interface
//!
//! The generated Google client lives outside this crate. The lifecycle engine only
//! depends on this trait, which lets tests substitute a scripted or mocked client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors returned by the remote control plane
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// Error response from the API, e.g. 400 "Please wait and try again once it is done"
    #[error("googleapi: Error {code}: {message}")]
    Api { code: u16, message: String },

    /// The request never produced an API response
    #[error("transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// HTTP status code if the API answered
    pub fn code(&self) -> Option<u16> {
        match self {
            ServiceError::Api { code, .. } => Some(*code),
            ServiceError::Transport(_) => None,
        }
    }
}

/// Status of a long-running control-plane operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    #[default]
    Pending,
    Running,
    Done,
    Aborting,
}

/// Handle to a long-running operation started by a mutation
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub name: String,
    pub operation_type: String,
    pub status: OperationStatus,
    pub target_link: String,
}

/// Mutations the lifecycle engine issues against the control plane
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GkeClusterService: Send + Sync {
    /// Start deleting the cluster addressed by `name`
    async fn cluster_delete(&self, name: &str) -> Result<Operation, ServiceError>;

    /// Start deleting the node pool addressed by `name`
    async fn node_pool_delete(&self, name: &str) -> Result<Operation, ServiceError>;
}
