//! Validation of M3DBCluster specs
//!
//! Generators accept any spec and resolve ambiguity on their own (the first
//! isolation group with a name wins). Callers that want to refuse such specs
//! up front run `validate_spec` before generating anything.

use std::collections::BTreeSet;

use tracing::warn;

use crate::controller::error::{Error, Result};
use crate::crd::{IsolationGroup, M3DBCluster};
use crate::resources::affinity::generate_statefulset_affinity;
use crate::resources::common::cluster_name;

/// Validate the cluster spec
pub fn validate_spec(cluster: &M3DBCluster) -> Result<()> {
    let name = cluster_name(cluster)?;
    validate_topology(cluster)?;
    validate_isolation_groups(name, &cluster.spec.isolation_groups)?;
    validate_config_source(cluster)?;
    Ok(())
}

/// Names that appear more than once among the groups, in first-seen order
pub fn duplicate_isolation_groups(groups: &[IsolationGroup]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = Vec::new();

    for group in groups {
        if !seen.insert(group.name.as_str()) && !duplicates.contains(&group.name) {
            duplicates.push(group.name.clone());
        }
    }

    duplicates
}

fn validate_isolation_groups(cluster_name: &str, groups: &[IsolationGroup]) -> Result<()> {
    let duplicates = duplicate_isolation_groups(groups);
    if !duplicates.is_empty() {
        warn!(
            cluster = %cluster_name,
            duplicates = ?duplicates,
            "Duplicate isolation group names"
        );
        return Err(Error::ValidationError(format!(
            "duplicate isolation group names: {}",
            duplicates.join(", ")
        )));
    }

    for group in groups {
        if group.name.is_empty() {
            return Err(Error::ValidationError(
                "isolation group name cannot be empty".to_string(),
            ));
        }

        if group.num_instances < 0 {
            return Err(Error::ValidationError(format!(
                "isolation group '{}' has negative numInstances {}",
                group.name, group.num_instances
            )));
        }

        generate_statefulset_affinity(group)?;
    }

    Ok(())
}

fn validate_topology(cluster: &M3DBCluster) -> Result<()> {
    let spec = &cluster.spec;

    if spec.replication_factor < 0 {
        return Err(Error::ValidationError(format!(
            "replicationFactor {} cannot be negative",
            spec.replication_factor
        )));
    }

    if spec.number_of_shards < 0 {
        return Err(Error::ValidationError(format!(
            "numberOfShards {} cannot be negative",
            spec.number_of_shards
        )));
    }

    Ok(())
}

/// The pods need a configuration from somewhere
fn validate_config_source(cluster: &M3DBCluster) -> Result<()> {
    if cluster.spec.config_map_name.is_none() && cluster.spec.etcd_endpoints.is_empty() {
        return Err(Error::ValidationError(
            "one of configMapName or etcdEndpoints must be set".to_string(),
        ));
    }
    Ok(())
}
