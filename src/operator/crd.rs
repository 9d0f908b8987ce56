use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==================== GKEClusterConfig CRD ====================

#[derive(CustomResource, Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "gke.cattle.io",
    version = "v1",
    kind = "GKEClusterConfig",
    plural = "gkeclusterconfigs",
    shortname = "gkecc",
    status = "GKEClusterConfigStatus",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct GKEClusterConfigSpec {
    /// Google Cloud project that owns the cluster
    #[serde(rename = "projectID", default)]
    pub project_id: String,

    /// Cluster name as known to the control plane
    #[serde(default)]
    pub cluster_name: String,

    /// Region for regional clusters
    #[serde(default)]
    pub region: String,

    /// Zone for zonal clusters (takes precedence over region)
    #[serde(default)]
    pub zone: String,

    /// Resource labels applied to the cluster
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_kubernetes_alpha: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_cluster_config: Option<GKEPrivateClusterConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary_authorization: Option<GKEBinaryAuthorization>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shielded_nodes: Option<GKEShieldedNodes>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_abac: Option<GKELegacyAbac>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_auth: Option<GKEMasterAuth>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_encryption: Option<GKEDatabaseEncryption>,

    /// Node pools managed alongside the cluster
    #[serde(default)]
    pub node_pools: Vec<GKENodePoolConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEPrivateClusterConfig {
    #[serde(default)]
    pub enable_private_endpoint: bool,

    #[serde(default)]
    pub enable_private_nodes: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub master_ipv4_cidr_block: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct GKEBinaryAuthorization {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct GKEShieldedNodes {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct GKELegacyAbac {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEMasterAuth {
    /// Basic auth username (must stay empty on compliant clusters)
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate_config: Option<GKEClientCertificateConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEClientCertificateConfig {
    #[serde(default)]
    pub issue_client_certificate: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEDatabaseEncryption {
    /// Either "ENCRYPTED" or "DECRYPTED"
    #[serde(default)]
    pub state: String,

    /// Cloud KMS key used for application-layer secrets encryption
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKENodePoolConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_node_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<GKENodeConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKENodeConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub image_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shielded_instance_config: Option<GKEShieldedInstanceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_metadata_config: Option<GKEWorkloadMetadataConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEShieldedInstanceConfig {
    #[serde(default)]
    pub enable_integrity_monitoring: bool,

    #[serde(default)]
    pub enable_secure_boot: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct GKEWorkloadMetadataConfig {
    /// "GKE_METADATA" or "GCE_METADATA"
    #[serde(default)]
    pub mode: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GKEClusterConfigStatus {
    /// Current phase of the cluster (creating, active, updating, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}
