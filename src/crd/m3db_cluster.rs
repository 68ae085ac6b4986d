use k8s_openapi::api::core::v1::{
    PersistentVolumeClaim, PodSecurityContext, ResourceRequirements, SecurityContext, Toleration,
};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// M3DBCluster is the Schema for the m3dbclusters API
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[kube(
    group = "operator.m3db.io",
    version = "v1alpha1",
    kind = "M3DBCluster",
    plural = "m3dbclusters",
    shortname = "m3db",
    namespaced,
    status = "M3DBClusterStatus",
    derive = "PartialEq",
    printcolumn = r#"{"name":"State", "type":"string", "jsonPath":".status.state"}"#,
    printcolumn = r#"{"name":"RF", "type":"integer", "jsonPath":".spec.replicationFactor"}"#,
    printcolumn = r#"{"name":"Shards", "type":"integer", "jsonPath":".spec.numberOfShards"}"#,
    printcolumn = r#"{"name":"Age", "type":"date", "jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct M3DBClusterSpec {
    /// Container image for the m3dbnode process
    #[serde(default)]
    pub image: String,

    /// Number of replicas of each shard
    #[serde(default)]
    pub replication_factor: i32,

    /// Total number of shards in the placement
    #[serde(default)]
    pub number_of_shards: i32,

    /// Failure domains to deploy data nodes into, one StatefulSet per group.
    /// Names are expected to be unique.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub isolation_groups: Vec<IsolationGroup>,

    /// Namespaces this cluster will hold
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub namespaces: Vec<Namespace>,

    /// etcd endpoints used for service discovery. Must be set unless
    /// `configMapName` is, and are templated into the default configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub etcd_endpoints: Vec<String>,

    /// Keep placement and namespace metadata in etcd when the cluster is deleted
    #[serde(default)]
    pub keep_etcd_data_on_delete: bool,

    /// ConfigMap holding `m3.yml`. Defaults to the operator-managed
    /// `m3db-config-map-<cluster>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_name: Option<String>,

    /// How pod identity is derived. Pod name and UID are used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_identity_config: Option<PodIdentityConfig>,

    /// Resource requirements for each m3dbnode container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_resources: Option<ResourceRequirements>,

    /// Claim template for the data directory. An emptyDir is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir_volume_claim_template: Option<PersistentVolumeClaim>,

    /// Pod-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_security_context: Option<PodSecurityContext>,

    /// Container-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,

    /// Base labels applied to every generated resource
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Base annotations applied to every generated resource
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Tolerations applied to all m3dbnode pods
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,

    /// Priority class for all m3dbnode pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
}

/// A node label and the values it may take for a pod to be placed on the node
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NodeAffinityTerm {
    /// Node label key
    pub key: String,

    /// Any of these values satisfies the term
    pub values: Vec<String>,
}

/// A failure domain (typically a zone) with its own instance count
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsolationGroup {
    /// Used in StatefulSet labels, pod labels and the placement
    /// `isolationGroup` field
    pub name: String,

    /// Requirements ANDed together to select the nodes this group may run on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_affinity_terms: Vec<NodeAffinityTerm>,

    /// Number of m3dbnode instances in this group
    #[serde(default)]
    pub num_instances: i32,

    /// Overrides the storage class of `dataDirVolumeClaimTemplate` for this
    /// group. Has no effect when the cluster has no claim template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

/// An M3DB namespace
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub name: String,

    /// Named preset, mutually exclusive with `options`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<NamespaceOptions>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceOptions {
    #[serde(default)]
    pub bootstrap_enabled: bool,
    #[serde(default)]
    pub flush_enabled: bool,
    #[serde(default)]
    pub writes_to_commit_log: bool,
    #[serde(default)]
    pub cleanup_enabled: bool,
    #[serde(default)]
    pub repair_enabled: bool,
    #[serde(default)]
    pub snapshot_enabled: bool,
    #[serde(default)]
    pub retention_options: RetentionOptions,
    #[serde(default)]
    pub index_options: IndexOptions,
}

/// Retention settings, durations in Go duration format (e.g. "48h")
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RetentionOptions {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub retention_period: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_size: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buffer_future: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub buffer_past: String,
    #[serde(default)]
    pub block_data_expiry: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_data_expiry_after_not_access_period: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexOptions {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub block_size: String,
}

/// Sources combined to build a pod's identity in the placement
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodIdentityConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<PodIdentitySource>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum PodIdentitySource {
    /// Name of the node the pod is scheduled on
    NodeName,
    /// Cloud provider ID of the node
    #[serde(rename = "ProviderID")]
    ProviderId,
}

/// Status of the M3DBCluster
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct M3DBClusterStatus {
    /// Overall health of the cluster
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ClusterState>,

    /// Lifecycle milestones, at most one per type.
    /// Mutate through `update_condition` only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<ClusterCondition>,

    /// Human readable explanation of the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last `metadata.generation` the operator observed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// Cluster health
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClusterState {
    /// Healthy
    Green,
    /// Degraded but serving
    Yellow,
    /// Critical
    Red,
}

impl std::fmt::Display for ClusterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterState::Green => write!(f, "green"),
            ClusterState::Yellow => write!(f, "yellow"),
            ClusterState::Red => write!(f, "red"),
        }
    }
}

/// Status of a condition
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl std::fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionStatus::True => write!(f, "True"),
            ConditionStatus::False => write!(f, "False"),
            ConditionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A condition the cluster can be in
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCondition {
    /// Type of condition, see `controller::status::condition_types`
    #[serde(rename = "type")]
    pub type_: String,

    /// True, False or Unknown
    #[serde(default)]
    pub status: ConditionStatus,

    /// Last time this condition was updated
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_update_time: String,

    /// Last time this condition transitioned from one status to another
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_transition_time: String,

    /// Reason for the last change
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,

    /// Human readable message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}
