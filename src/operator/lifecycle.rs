//! Lifecycle Reconciliation Engine
//!
//! Drives delete mutations for clusters and node pools against the control plane.
//! Cluster deletes retry internally while the control plane reports another
//! operation in flight; node pool deletes make a single attempt and hand the
//! requeue decision back to the caller's reconcile loop.

use super::backoff::BackoffPolicy;
use super::classify::{ErrorClass, ErrorClassifier, MarkerClassifier};
use super::crd::GKEClusterConfig;
use super::outcome::Outcome;
use super::rrn::ResourceName;
use super::services::{GkeClusterService, ServiceError};
use super::types::{OperatorError, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Bookkeeping for one attempt of a mutation
#[derive(Debug)]
pub struct OperationAttempt {
    pub ordinal: u32,
    pub started: Instant,
    pub last_error: Option<ServiceError>,
}

impl OperationAttempt {
    fn start(ordinal: u32) -> Self {
        Self {
            ordinal,
            started: Instant::now(),
            last_error: None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Runs delete operations to completion under a fixed retry budget
#[derive(Debug, Clone)]
pub struct LifecycleEngine<C = MarkerClassifier> {
    backoff: BackoffPolicy,
    classifier: C,
}

impl LifecycleEngine<MarkerClassifier> {
    pub fn new(backoff: BackoffPolicy) -> Self {
        Self::with_classifier(backoff, MarkerClassifier)
    }
}

impl Default for LifecycleEngine<MarkerClassifier> {
    fn default() -> Self {
        Self::new(BackoffPolicy::default())
    }
}

impl<C: ErrorClassifier> LifecycleEngine<C> {
    pub fn with_classifier(backoff: BackoffPolicy, classifier: C) -> Self {
        Self {
            backoff,
            classifier,
        }
    }

    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Delete the cluster described by `config`, retrying while the control plane is busy.
    ///
    /// Deleting a cluster that no longer exists succeeds. Running out of attempts
    /// while still busy yields [`OperatorError::Exhausted`].
    pub async fn remove_cluster(
        &self,
        cancel: &CancellationToken,
        client: &dyn GkeClusterService,
        config: &GKEClusterConfig,
    ) -> Result<()> {
        let resource = ResourceName::for_cluster(&config.spec).inspect_err(|e| {
            error!(cluster = %config.spec.cluster_name, error = %e, "Invalid cluster identity");
        })?;
        info!(resource = %resource, steps = self.backoff.steps, "Starting cluster removal");

        let mut last_error: Option<ServiceError> = None;

        for ordinal in 1..=self.backoff.steps {
            if cancel.is_cancelled() {
                error!(resource = %resource, attempt = ordinal, "Cancelled before cluster delete call");
                return Err(OperatorError::Cancelled);
            }

            let mut attempt = OperationAttempt::start(ordinal);
            debug!(resource = %resource, attempt = ordinal, "Calling cluster delete");

            let result = client.cluster_delete(resource.as_str()).await;
            let class = self.classifier.classify(result.as_ref().err());
            attempt.last_error = result.as_ref().err().cloned();

            match (class, result) {
                (ErrorClass::None, Ok(op)) => {
                    info!(
                        resource = %resource,
                        attempt = ordinal,
                        operation = %op.name,
                        elapsed = ?attempt.elapsed(),
                        "Cluster delete accepted"
                    );
                    return Ok(());
                }
                (ErrorClass::Absent, _) => {
                    info!(resource = %resource, attempt = ordinal, class = %class, "Cluster not found, considering deletion successful");
                    return Ok(());
                }
                (ErrorClass::Busy, _) => {
                    warn!(resource = %resource, attempt = ordinal, class = %class, "Cluster is busy");
                    last_error = attempt.last_error.take();

                    if self.backoff.has_next(ordinal) {
                        let delay = self.backoff.delay_after(ordinal);
                        debug!(resource = %resource, attempt = ordinal, delay = ?delay, "Waiting before next attempt");
                        tokio::select! {
                            _ = sleep(delay) => {}
                            _ = cancel.cancelled() => {}
                        }
                    }
                }
                (_, Err(e)) => {
                    error!(resource = %resource, attempt = ordinal, class = %class, error = %e, "Permanent error deleting cluster");
                    return Err(OperatorError::Remote(e));
                }
                (class, Ok(_)) => {
                    // A classifier reporting an error for a successful call is treated as success.
                    debug!(resource = %resource, attempt = ordinal, class = %class, "Ignoring classification of successful call");
                    return Ok(());
                }
            }
        }

        let last_error = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no attempts made".to_string());
        error!(
            resource = %resource,
            attempts = self.backoff.steps,
            last_error = %last_error,
            "Retry budget exhausted while cluster stayed busy"
        );
        Err(OperatorError::Exhausted {
            resource: resource.to_string(),
            attempts: self.backoff.steps,
            last_error,
        })
    }

    /// Delete one node pool of the cluster with a single attempt.
    ///
    /// A busy control plane yields [`Outcome::Retry`], an absent pool
    /// [`Outcome::NotChanged`]. Any returned error means the pool was not changed.
    pub async fn remove_node_pool(
        &self,
        cancel: &CancellationToken,
        client: &dyn GkeClusterService,
        config: &GKEClusterConfig,
        node_pool_name: &str,
    ) -> Result<Outcome> {
        let resource = ResourceName::for_node_pool(&config.spec, node_pool_name).inspect_err(|e| {
            error!(node_pool = node_pool_name, error = %e, "Invalid node pool identity");
        })?;
        if cancel.is_cancelled() {
            error!(resource = %resource, "Cancelled before node pool delete call");
            return Err(OperatorError::Cancelled);
        }

        let result = client.node_pool_delete(resource.as_str()).await;
        let class = self.classifier.classify(result.as_ref().err());

        let outcome = match (class, result) {
            (ErrorClass::Busy, _) => Outcome::Retry,
            (ErrorClass::Absent, _) => Outcome::NotChanged,
            (ErrorClass::Fatal, Err(e)) | (ErrorClass::None, Err(e)) => {
                error!(resource = %resource, class = %class, error = %e, "Error deleting node pool");
                return Err(OperatorError::Remote(e));
            }
            (_, Ok(_)) => Outcome::Changed,
        };

        info!(resource = %resource, class = %class, outcome = %outcome, "Node pool delete attempted");
        Ok(outcome)
    }
}
