//! Reading `GKEClusterConfig` manifests from disk

use crate::error::Result;
use crate::operator::GKEClusterConfig;
use std::path::Path;
use tracing::debug;

/// Parse a `GKEClusterConfig` from a YAML (or JSON) document
pub fn parse_cluster_config(source: &str) -> Result<GKEClusterConfig> {
    let config: GKEClusterConfig = serde_yaml_ng::from_str(source)?;
    Ok(config)
}

/// Read and parse a `GKEClusterConfig` manifest file
pub fn load_cluster_config(path: &Path) -> Result<GKEClusterConfig> {
    let source = std::fs::read_to_string(path)?;
    let config = parse_cluster_config(&source)?;
    debug!(path = %path.display(), cluster = %config.spec.cluster_name, "Loaded cluster manifest");
    Ok(config)
}
