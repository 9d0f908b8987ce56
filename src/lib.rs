//! # gke-lifecycle
//!
//! Lifecycle reconciliation for GKE clusters and node pools.
//!
//! This crate drives delete operations against the GKE control plane to completion,
//! retrying while the control plane reports another operation in flight, and checks
//! cluster configurations against a fixed security compliance checklist.

pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod operator;

pub use error::{Error, Result};
pub use operator::{
    needs_security_compliance, validate_security_compliance, BackoffPolicy, LifecycleEngine,
    Outcome,
};
