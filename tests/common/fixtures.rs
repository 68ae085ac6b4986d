//! Test fixtures and builders for M3DBCluster resources
//!
//! # Quick Start
//!
//! For simple unit tests, use the convenience functions:
//! ```rust,ignore
//! let cluster = create_test_cluster("cluster-a", "default");
//! let full = create_full_cluster();
//! ```
//!
//! For more complex configurations, use the builder pattern:
//! ```rust,ignore
//! let cluster = M3DBClusterBuilder::new("cluster-a", "default")
//!     .with_isolation_group("group-0", 3)
//!     .with_claim_template("fake-sc", "1Gi")
//!     .build();
//! ```

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{
    PersistentVolumeClaim, PersistentVolumeClaimSpec, PodSecurityContext, ResourceRequirements,
    SecurityContext, Toleration, VolumeResourceRequirements,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use kube::core::ObjectMeta;
use m3db_operator::crd::{
    IsolationGroup, M3DBCluster, M3DBClusterSpec, M3DBClusterStatus, NodeAffinityTerm,
};

#[allow(dead_code)]
pub const TEST_IMAGE: &str = "quay.io/m3db/m3dbnode:latest";
#[allow(dead_code)]
pub const TEST_UID: &str = "test-uid-12345";

// =============================================================================
// Convenience Functions for Simple Test Cases
// =============================================================================

/// Create a cluster with a single isolation group `group-0` of 3 instances
#[allow(dead_code)]
pub fn create_test_cluster(name: &str, namespace: &str) -> M3DBCluster {
    M3DBClusterBuilder::new(name, namespace)
        .with_isolation_group("group-0", 3)
        .with_etcd_endpoints(&["http://etcd-0.etcd:2379"])
        .build()
}

/// Create a fully populated three-zone cluster
///
/// Every optional field that reaches a generated object is set, so tests can
/// check that it is carried through.
#[allow(dead_code)]
pub fn create_full_cluster() -> M3DBCluster {
    M3DBClusterBuilder::new("m3db-cluster", "fake")
        .with_replication_factor(3)
        .with_number_of_shards(8)
        .with_zoned_isolation_group("us-fake1-a", "zone-a", 1)
        .with_zoned_isolation_group("us-fake1-b", "zone-b", 1)
        .with_zoned_isolation_group("us-fake1-c", "zone-c", 1)
        .with_etcd_endpoints(&["http://etcd-0.etcd:2379", "http://etcd-1.etcd:2379"])
        .with_claim_template("fake-sc", "1Gi")
        .with_resources("2", "2Gi")
        .with_priority_class("m3db-priority")
        .with_toleration("m3db-dedicated")
        .with_pod_security(10, 20)
        .with_label("team", "storage")
        .with_annotation("owner", "storage-team")
        .build()
}

// =============================================================================
// M3DBCluster Builder
// =============================================================================

#[allow(dead_code)]
pub struct M3DBClusterBuilder {
    name: String,
    namespace: String,
    uid: Option<String>,
    generation: Option<i64>,
    spec: M3DBClusterSpec,
    status: Option<M3DBClusterStatus>,
}

#[allow(dead_code)]
impl M3DBClusterBuilder {
    /// Create a new builder with no isolation groups
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            uid: Some(TEST_UID.to_string()),
            generation: Some(1),
            spec: M3DBClusterSpec {
                image: TEST_IMAGE.to_string(),
                replication_factor: 1,
                number_of_shards: 8,
                ..Default::default()
            },
            status: None,
        }
    }

    pub fn with_uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn with_generation(mut self, generation: i64) -> Self {
        self.generation = Some(generation);
        self
    }

    pub fn with_image(mut self, image: &str) -> Self {
        self.spec.image = image.to_string();
        self
    }

    pub fn with_replication_factor(mut self, rf: i32) -> Self {
        self.spec.replication_factor = rf;
        self
    }

    pub fn with_number_of_shards(mut self, shards: i32) -> Self {
        self.spec.number_of_shards = shards;
        self
    }

    /// Add an isolation group without node affinity
    pub fn with_isolation_group(mut self, name: &str, instances: i32) -> Self {
        self.spec.isolation_groups.push(IsolationGroup {
            name: name.to_string(),
            num_instances: instances,
            ..Default::default()
        });
        self
    }

    /// Add an isolation group pinned to a zone
    pub fn with_zoned_isolation_group(mut self, name: &str, zone: &str, instances: i32) -> Self {
        self.spec.isolation_groups.push(IsolationGroup {
            name: name.to_string(),
            num_instances: instances,
            node_affinity_terms: vec![NodeAffinityTerm {
                key: "zone".to_string(),
                values: vec![zone.to_string()],
            }],
            ..Default::default()
        });
        self
    }

    /// Add a fully specified isolation group
    pub fn with_group(mut self, group: IsolationGroup) -> Self {
        self.spec.isolation_groups.push(group);
        self
    }

    pub fn with_etcd_endpoints(mut self, endpoints: &[&str]) -> Self {
        self.spec.etcd_endpoints = endpoints.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_config_map(mut self, name: &str) -> Self {
        self.spec.config_map_name = Some(name.to_string());
        self
    }

    /// Persist data through a claim template with the given storage class
    pub fn with_claim_template(mut self, storage_class: &str, size: &str) -> Self {
        self.spec.data_dir_volume_claim_template = Some(PersistentVolumeClaim {
            metadata: ObjectMeta {
                name: Some("m3db-data".to_string()),
                ..Default::default()
            },
            spec: Some(PersistentVolumeClaimSpec {
                access_modes: Some(vec!["ReadWriteOnce".to_string()]),
                storage_class_name: Some(storage_class.to_string()),
                resources: Some(VolumeResourceRequirements {
                    requests: Some(BTreeMap::from([(
                        "storage".to_string(),
                        Quantity(size.to_string()),
                    )])),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        });
        self
    }

    pub fn with_resources(mut self, cpu: &str, memory: &str) -> Self {
        let list = BTreeMap::from([
            ("cpu".to_string(), Quantity(cpu.to_string())),
            ("memory".to_string(), Quantity(memory.to_string())),
        ]);
        self.spec.container_resources = Some(ResourceRequirements {
            requests: Some(list.clone()),
            limits: Some(list),
            ..Default::default()
        });
        self
    }

    pub fn with_priority_class(mut self, name: &str) -> Self {
        self.spec.priority_class_name = Some(name.to_string());
        self
    }

    /// Tolerate a `dedicated=<value>:NoSchedule` taint
    pub fn with_toleration(mut self, value: &str) -> Self {
        self.spec.tolerations.push(Toleration {
            key: Some("dedicated".to_string()),
            operator: Some("Equal".to_string()),
            value: Some(value.to_string()),
            effect: Some("NoSchedule".to_string()),
            ..Default::default()
        });
        self
    }

    pub fn with_pod_security(mut self, fs_group: i64, run_as_user: i64) -> Self {
        self.spec.pod_security_context = Some(PodSecurityContext {
            fs_group: Some(fs_group),
            ..Default::default()
        });
        self.spec.security_context = Some(SecurityContext {
            run_as_user: Some(run_as_user),
            ..Default::default()
        });
        self
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.spec.labels.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_annotation(mut self, key: &str, value: &str) -> Self {
        self.spec
            .annotations
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_status(mut self, status: M3DBClusterStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> M3DBCluster {
        M3DBCluster {
            metadata: ObjectMeta {
                name: Some(self.name),
                namespace: Some(self.namespace),
                uid: self.uid,
                generation: self.generation,
                ..Default::default()
            },
            spec: self.spec,
            status: self.status,
        }
    }
}
