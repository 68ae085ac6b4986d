//! Resource synthesis for M3DB clusters on Kubernetes
//!
//! Turns an `M3DBCluster` custom resource into the objects that run it: one
//! StatefulSet per isolation group, a headless service for the data nodes, a
//! coordinator service and, when no ConfigMap is named, a default one. The
//! cluster status carries a ledger of lifecycle conditions.

pub mod controller;
pub mod crd;
pub mod resources;

pub use controller::{Error, Result, condition_types, spec_changed, validate_spec};
pub use crd::{
    ClusterCondition, ConditionStatus, IsolationGroup, M3DBCluster, M3DBClusterSpec,
    M3DBClusterStatus,
};
pub use resources::{
    generate_coordinator_service, generate_default_config_map, generate_m3db_service,
    generate_statefulset, generate_statefulsets,
};
