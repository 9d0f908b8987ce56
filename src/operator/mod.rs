mod backoff;
mod classify;
mod compliance;
mod crd;
mod lifecycle;
mod outcome;
mod rrn;
mod services;
mod types;

pub use backoff::{BackoffPolicy, DEFAULT_STEPS, DEFAULT_WAIT};
pub use classify::{ErrorClass, ErrorClassifier, MarkerClassifier, ERR_NOT_FOUND, ERR_WAIT};
pub use compliance::{
    needs_security_compliance, validate_security_compliance, ComplianceViolation,
    COMPLIANCE_ANNOTATION_KEY, COMPLIANCE_LABEL_KEY, COMPLIANCE_LABEL_VALUE,
};
pub use crd::{
    GKEBinaryAuthorization, GKEClientCertificateConfig, GKEClusterConfig, GKEClusterConfigSpec,
    GKEClusterConfigStatus, GKEDatabaseEncryption, GKELegacyAbac, GKEMasterAuth, GKENodeConfig,
    GKENodePoolConfig, GKEPrivateClusterConfig, GKEShieldedInstanceConfig, GKEShieldedNodes,
    GKEWorkloadMetadataConfig,
};
pub use lifecycle::{LifecycleEngine, OperationAttempt};
pub use outcome::Outcome;
pub use rrn::ResourceName;
pub use services::{GkeClusterService, Operation, OperationStatus, ServiceError};
pub use types::{OperatorError, Result};
