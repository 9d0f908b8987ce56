//! Security Compliance
//!
//! Fixed security checklist for clusters labelled or annotated as requiring compliance.
//! Rules are evaluated in order and the first failing rule is reported.

use super::crd::{GKEClusterConfig, GKENodePoolConfig};
use thiserror::Error;

/// Label that opts a cluster into the checklist when set to [`COMPLIANCE_LABEL_VALUE`]
pub const COMPLIANCE_LABEL_KEY: &str = "compliance";
pub const COMPLIANCE_LABEL_VALUE: &str = "security";

/// Annotation that opts a cluster into the checklist when set to `"true"`
pub const COMPLIANCE_ANNOTATION_KEY: &str = "gke.cattle.io/security-compliance";

pub const DATABASE_ENCRYPTED: &str = "ENCRYPTED";
pub const GKE_METADATA_MODE: &str = "GKE_METADATA";

/// First checklist rule a cluster configuration failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceViolation {
    #[error("alpha features must be disabled for security compliance")]
    AlphaFeaturesEnabled,

    #[error("private nodes must be enabled for security compliance")]
    PrivateNodesDisabled,

    #[error("binary authorization must be enabled for security compliance")]
    BinaryAuthorizationDisabled,

    #[error("shielded nodes must be enabled for security compliance")]
    ShieldedNodesDisabled,

    #[error("legacy ABAC must be disabled for security compliance")]
    LegacyAbacEnabled,

    #[error("basic authentication must be disabled for security compliance")]
    BasicAuthEnabled,

    #[error("client certificate issuance must be disabled for security compliance")]
    ClientCertificateEnabled,

    #[error("database encryption must be enabled for security compliance")]
    DatabaseEncryptionDisabled,

    #[error("node pool {0} config cannot be nil for security compliance")]
    NodePoolConfigMissing(usize),

    #[error("node pool {0} must have shielded instance config with integrity monitoring and secure boot enabled")]
    NodePoolNotShielded(usize),

    #[error("node pool {0} must use GKE_METADATA mode for security compliance")]
    NodePoolMetadataExposed(usize),
}

impl ComplianceViolation {
    /// 1-based position of the violated rule in the checklist
    pub fn rule(&self) -> u8 {
        match self {
            Self::AlphaFeaturesEnabled => 1,
            Self::PrivateNodesDisabled => 2,
            Self::BinaryAuthorizationDisabled => 3,
            Self::ShieldedNodesDisabled => 4,
            Self::LegacyAbacEnabled => 5,
            Self::BasicAuthEnabled | Self::ClientCertificateEnabled => 6,
            Self::DatabaseEncryptionDisabled => 7,
            Self::NodePoolConfigMissing(_)
            | Self::NodePoolNotShielded(_)
            | Self::NodePoolMetadataExposed(_) => 8,
        }
    }
}

/// Check `config` against the security checklist, stopping at the first violation
pub fn validate_security_compliance(config: &GKEClusterConfig) -> Result<(), ComplianceViolation> {
    let spec = &config.spec;

    if spec.enable_kubernetes_alpha == Some(true) {
        return Err(ComplianceViolation::AlphaFeaturesEnabled);
    }

    if !spec
        .private_cluster_config
        .as_ref()
        .is_some_and(|p| p.enable_private_nodes)
    {
        return Err(ComplianceViolation::PrivateNodesDisabled);
    }

    if !spec.binary_authorization.as_ref().is_some_and(|b| b.enabled) {
        return Err(ComplianceViolation::BinaryAuthorizationDisabled);
    }

    if !spec.shielded_nodes.as_ref().is_some_and(|s| s.enabled) {
        return Err(ComplianceViolation::ShieldedNodesDisabled);
    }

    if spec.legacy_abac.as_ref().is_some_and(|a| a.enabled) {
        return Err(ComplianceViolation::LegacyAbacEnabled);
    }

    if let Some(auth) = &spec.master_auth {
        if !auth.username.is_empty() || !auth.password.is_empty() {
            return Err(ComplianceViolation::BasicAuthEnabled);
        }
        if auth
            .client_certificate_config
            .as_ref()
            .is_some_and(|c| c.issue_client_certificate)
        {
            return Err(ComplianceViolation::ClientCertificateEnabled);
        }
    }

    if !spec
        .database_encryption
        .as_ref()
        .is_some_and(|d| d.state == DATABASE_ENCRYPTED)
    {
        return Err(ComplianceViolation::DatabaseEncryptionDisabled);
    }

    for (index, pool) in spec.node_pools.iter().enumerate() {
        validate_node_pool(index, pool)?;
    }

    Ok(())
}

fn validate_node_pool(index: usize, pool: &GKENodePoolConfig) -> Result<(), ComplianceViolation> {
    let Some(config) = &pool.config else {
        return Err(ComplianceViolation::NodePoolConfigMissing(index));
    };

    let shielded = config
        .shielded_instance_config
        .as_ref()
        .is_some_and(|s| s.enable_integrity_monitoring && s.enable_secure_boot);
    if !shielded {
        return Err(ComplianceViolation::NodePoolNotShielded(index));
    }

    if !config
        .workload_metadata_config
        .as_ref()
        .is_some_and(|w| w.mode == GKE_METADATA_MODE)
    {
        return Err(ComplianceViolation::NodePoolMetadataExposed(index));
    }

    Ok(())
}

/// Whether the checklist applies: label `compliance=security` or
/// annotation `gke.cattle.io/security-compliance=true`
pub fn needs_security_compliance(config: &GKEClusterConfig) -> bool {
    let labelled = config
        .spec
        .labels
        .get(COMPLIANCE_LABEL_KEY)
        .is_some_and(|v| v == COMPLIANCE_LABEL_VALUE);

    let annotated = config
        .metadata
        .annotations
        .as_ref()
        .and_then(|a| a.get(COMPLIANCE_ANNOTATION_KEY))
        .is_some_and(|v| v == "true");

    labelled || annotated
}
