//! Resource names
//!
//! Deterministic relative resource names used to address clusters and node pools
//! on the control plane, and to correlate log lines for the same resource.

use super::crd::GKEClusterConfigSpec;
use super::types::{OperatorError, Result};
use std::fmt;

/// Relative resource name of a cluster or node pool
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceName(String);

impl ResourceName {
    /// `projects/{project}/locations/{location}/clusters/{cluster}`
    pub fn cluster(project_id: &str, location: &str, cluster_name: &str) -> Result<Self> {
        Ok(Self(format!(
            "projects/{}/locations/{}/clusters/{}",
            segment("project", project_id)?,
            segment("location", location)?,
            segment("cluster name", cluster_name)?
        )))
    }

    /// `projects/{project}/locations/{location}/clusters/{cluster}/nodePools/{pool}`
    pub fn node_pool(
        project_id: &str,
        location: &str,
        cluster_name: &str,
        node_pool_name: &str,
    ) -> Result<Self> {
        let cluster = Self::cluster(project_id, location, cluster_name)?;
        Ok(Self(format!(
            "{}/nodePools/{}",
            cluster.0,
            segment("node pool name", node_pool_name)?
        )))
    }

    /// Zonal clusters are addressed by zone, regional ones by region
    pub fn location<'a>(region: &'a str, zone: &'a str) -> &'a str {
        if zone.is_empty() {
            region
        } else {
            zone
        }
    }

    pub fn for_cluster(spec: &GKEClusterConfigSpec) -> Result<Self> {
        Self::cluster(
            &spec.project_id,
            Self::location(&spec.region, &spec.zone),
            &spec.cluster_name,
        )
    }

    pub fn for_node_pool(spec: &GKEClusterConfigSpec, node_pool_name: &str) -> Result<Self> {
        Self::node_pool(
            &spec.project_id,
            Self::location(&spec.region, &spec.zone),
            &spec.cluster_name,
            node_pool_name,
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single path segment: non-empty and free of separators
fn segment<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(OperatorError::InvalidSpec(format!("{} must not be empty", what)));
    }
    if value.contains('/') {
        return Err(OperatorError::InvalidSpec(format!(
            "{} must not contain '/': {}",
            what, value
        )));
    }
    Ok(value)
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
