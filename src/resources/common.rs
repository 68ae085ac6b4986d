//! Common utilities for Kubernetes resource generation
//!
//! This module provides shared names, labels, annotations and the owner
//! reference used by every resource generated for an M3DBCluster.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;

use crate::controller::error::{Error, Result};
use crate::crd::M3DBCluster;

/// API version for the M3DBCluster CRD
pub const API_VERSION: &str = "operator.m3db.io/v1alpha1";

/// Kind for the M3DBCluster CRD
pub const KIND: &str = "M3DBCluster";

/// Prefix for data node resources (StatefulSets and the headless service)
pub const M3DB_NODE_PREFIX: &str = "m3dbnode";

/// Prefix for the coordinator service
pub const COORDINATOR_PREFIX: &str = "m3coordinator";

/// Prefix for the operator-managed configuration ConfigMap
pub const CONFIG_MAP_PREFIX: &str = "m3db-config-map";

/// Label keys and their fixed values
pub mod labels {
    pub const CLUSTER: &str = "operator.m3db.io/cluster";
    pub const APP: &str = "operator.m3db.io/app";
    pub const COMPONENT: &str = "operator.m3db.io/component";
    pub const STATEFUL_SET: &str = "operator.m3db.io/stateful-set";
    pub const ISOLATION_GROUP: &str = "operator.m3db.io/isolation-group";

    pub const APP_M3DB: &str = "m3db";
    pub const COMPONENT_M3DB_NODE: &str = "m3dbnode";
    pub const COMPONENT_COORDINATOR: &str = "m3coordinator";
}

/// Annotation keys
pub mod annotations {
    pub const APP: &str = "operator.m3db.io/app";
    pub const CLUSTER: &str = "operator.m3db.io/cluster";
    /// Read by pods through the downward API to learn their placement identity
    pub const POD_IDENTITY: &str = "operator.m3db.io/pod-identity";
}

/// Name of the cluster, rejecting clusters without one
pub fn cluster_name(cluster: &M3DBCluster) -> Result<&str> {
    match cluster.metadata.name.as_deref() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::ValidationError(
            "cluster name cannot be empty".to_string(),
        )),
    }
}

/// StatefulSet name for the isolation group at `index` of `isolationGroups`
pub fn statefulset_name(cluster_name: &str, index: usize) -> String {
    format!("{}-{}-{}", M3DB_NODE_PREFIX, cluster_name, index)
}

/// Name of the headless data node service
pub fn headless_service_name(cluster_name: &str) -> String {
    format!("{}-{}", M3DB_NODE_PREFIX, cluster_name)
}

/// Name of the coordinator service
pub fn coordinator_service_name(cluster_name: &str) -> String {
    format!("{}-{}", COORDINATOR_PREFIX, cluster_name)
}

/// Name of the ConfigMap the operator provides when none is configured
pub fn default_config_map_name(cluster_name: &str) -> String {
    format!("{}-{}", CONFIG_MAP_PREFIX, cluster_name)
}

/// Generate an owner reference for an M3DBCluster
///
/// This ensures that all child resources are properly owned by the cluster
/// and will be garbage collected when the cluster is deleted.
pub fn owner_reference(cluster: &M3DBCluster) -> OwnerReference {
    OwnerReference {
        api_version: API_VERSION.to_string(),
        kind: KIND.to_string(),
        name: cluster.metadata.name.clone().unwrap_or_default(),
        uid: cluster.metadata.uid.clone().unwrap_or_default(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

/// Operator labels identifying a component of a cluster
///
/// These are the labels used in selectors, so they never include
/// user-defined labels.
pub fn selector_labels(cluster_name: &str, component: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (labels::CLUSTER.to_string(), cluster_name.to_string()),
        (labels::APP.to_string(), labels::APP_M3DB.to_string()),
        (labels::COMPONENT.to_string(), component.to_string()),
    ])
}

/// Generate labels for a resource including user-defined labels from the cluster.
///
/// User labels can not override the operator labels.
pub fn cluster_labels(cluster: &M3DBCluster, component: &str) -> BTreeMap<String, String> {
    let name = cluster.metadata.name.as_deref().unwrap_or_default();
    let mut labels = cluster.spec.labels.clone();
    labels.extend(selector_labels(name, component));
    labels
}

/// Generate annotations for a resource including user-defined annotations.
///
/// User annotations can not override the operator annotations.
pub fn cluster_annotations(cluster: &M3DBCluster) -> BTreeMap<String, String> {
    let name = cluster.metadata.name.as_deref().unwrap_or_default();
    let mut merged = cluster.spec.annotations.clone();
    merged.insert(annotations::APP.to_string(), labels::APP_M3DB.to_string());
    merged.insert(annotations::CLUSTER.to_string(), name.to_string());
    merged
}
