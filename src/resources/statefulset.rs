//! StatefulSet generation for M3DB data nodes
//!
//! Every isolation group of a cluster runs as its own StatefulSet. The
//! StatefulSet is named after the group's position in `isolationGroups`, so
//! reordering the groups renames (and recreates) StatefulSets.
//!
//! Generation is a pure function of the cluster: the same cluster always
//! yields the same StatefulSet, so it can be regenerated on every
//! reconciliation and compared against what is running.

use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{StatefulSet, StatefulSetSpec};
use k8s_openapi::api::core::v1::{
    Affinity, Container, DownwardAPIVolumeFile, DownwardAPIVolumeSource, EmptyDirVolumeSource,
    EnvVar, EnvVarSource, HTTPGetAction, ObjectFieldSelector, PodSpec, PodTemplateSpec, Probe,
    Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::ResourceExt;
use kube::core::ObjectMeta;
use tracing::debug;

use crate::controller::error::{Error, Result};
use crate::crd::{IsolationGroup, M3DBCluster, isolation_group_position};
use crate::resources::affinity::generate_statefulset_affinity;
use crate::resources::common::{
    annotations, cluster_annotations, cluster_labels, cluster_name, headless_service_name, labels,
    owner_reference, selector_labels, statefulset_name,
};
use crate::resources::ports::{PORT_M3DB_HTTP_NODE, container_ports};
use crate::resources::volumes::{
    DataVolume, config_volume, configuration_file_location, data_volume, data_volume_mount,
};

pub const PROBE_TIMEOUT_SECONDS: i32 = 30;
pub const PROBE_INITIAL_DELAY_SECONDS: i32 = 10;
pub const PROBE_FAILURE_THRESHOLD: i32 = 15;

pub const PROBE_PATH_HEALTH: &str = "/health";
pub const PROBE_PATH_READY: &str = "/bootstrappedinplacementornoplacement";

const M3DB_COMMAND: &str = "m3dbnode";
const IMAGE_PULL_POLICY: &str = "Always";

const CACHE_VOLUME_NAME: &str = "cache";
pub const CACHE_DIRECTORY: &str = "/var/lib/m3kv/";

const POD_IDENTITY_VOLUME_NAME: &str = "pod-identity";
pub const POD_IDENTITY_DIRECTORY: &str = "/etc/m3db/pod-identity";
pub const POD_IDENTITY_FILE_NAME: &str = "identity";

/// Generate the StatefulSet for one isolation group
///
/// `instance_count` sets the replica count of this StatefulSet only. Fails
/// with `ValidationError` for an unnamed cluster or a negative instance
/// count, `NotFound` when the group
/// is not in the cluster, and an `UpstreamError` when the group's affinity is
/// invalid. Nothing is returned on failure.
pub fn generate_statefulset(
    cluster: &M3DBCluster,
    isolation_group_name: &str,
    instance_count: i32,
) -> Result<StatefulSet> {
    let name = cluster_name(cluster)?;

    if instance_count < 0 {
        return Err(Error::ValidationError(format!(
            "instance count {} for isolation group '{}' cannot be negative",
            instance_count, isolation_group_name
        )));
    }

    let (index, group) =
        isolation_group_position(&cluster.spec.isolation_groups, isolation_group_name)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "isolation group '{}' not found in cluster spec",
                    isolation_group_name
                ))
            })?;

    let sts_name = statefulset_name(name, index);

    let affinity = generate_statefulset_affinity(group).map_err(|e| {
        e.context(format!(
            "error generating statefulset affinity for isolation group '{}'",
            group.name
        ))
    })?;

    let statefulset = build_statefulset(cluster, group, &sts_name, instance_count, affinity);

    debug!(
        cluster = %name,
        statefulset = %sts_name,
        isolation_group = %group.name,
        replicas = instance_count,
        "Generated statefulset"
    );

    Ok(statefulset)
}

/// Generate the StatefulSets for every isolation group, in spec order
///
/// Each group's `numInstances` is used as its replica count. Fails on the
/// first group that can not be generated.
pub fn generate_statefulsets(cluster: &M3DBCluster) -> Result<Vec<StatefulSet>> {
    cluster
        .spec
        .isolation_groups
        .iter()
        .map(|group| generate_statefulset(cluster, &group.name, group.num_instances))
        .collect()
}

/// Labels selecting the pods of one StatefulSet
fn statefulset_selector_labels(
    cluster_name: &str,
    sts_name: &str,
    group_name: &str,
) -> BTreeMap<String, String> {
    let mut selector = selector_labels(cluster_name, labels::COMPONENT_M3DB_NODE);
    selector.insert(labels::STATEFUL_SET.to_string(), sts_name.to_string());
    selector.insert(labels::ISOLATION_GROUP.to_string(), group_name.to_string());
    selector
}

fn http_probe(path: &str) -> Probe {
    Probe {
        http_get: Some(HTTPGetAction {
            path: Some(path.to_string()),
            port: IntOrString::Int(PORT_M3DB_HTTP_NODE),
            scheme: Some("HTTP".to_string()),
            ..Default::default()
        }),
        timeout_seconds: Some(PROBE_TIMEOUT_SECONDS),
        initial_delay_seconds: Some(PROBE_INITIAL_DELAY_SECONDS),
        failure_threshold: Some(PROBE_FAILURE_THRESHOLD),
        ..Default::default()
    }
}

/// Assemble the StatefulSet once every fallible step has succeeded
fn build_statefulset(
    cluster: &M3DBCluster,
    group: &IsolationGroup,
    sts_name: &str,
    instance_count: i32,
    affinity: Option<Affinity>,
) -> StatefulSet {
    let name = cluster.name_any();
    let spec = &cluster.spec;

    let selector = statefulset_selector_labels(&name, sts_name, &group.name);
    let mut sts_labels = cluster_labels(cluster, labels::COMPONENT_M3DB_NODE);
    sts_labels.extend(selector.clone());

    let config = config_volume(cluster);

    let volume_mounts = vec![
        data_volume_mount(),
        VolumeMount {
            name: CACHE_VOLUME_NAME.to_string(),
            mount_path: CACHE_DIRECTORY.to_string(),
            ..Default::default()
        },
        VolumeMount {
            name: POD_IDENTITY_VOLUME_NAME.to_string(),
            mount_path: POD_IDENTITY_DIRECTORY.to_string(),
            ..Default::default()
        },
        config.mount,
    ];

    let mut volumes = vec![
        Volume {
            name: CACHE_VOLUME_NAME.to_string(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        },
        // m3dbnode reads its placement identity from this file
        Volume {
            name: POD_IDENTITY_VOLUME_NAME.to_string(),
            downward_api: Some(DownwardAPIVolumeSource {
                items: Some(vec![DownwardAPIVolumeFile {
                    path: POD_IDENTITY_FILE_NAME.to_string(),
                    field_ref: Some(ObjectFieldSelector {
                        field_path: format!(
                            "metadata.annotations['{}']",
                            annotations::POD_IDENTITY
                        ),
                        ..Default::default()
                    }),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..Default::default()
        },
        config.volume,
    ];

    let volume_claim_templates = match data_volume(cluster, group) {
        DataVolume::Ephemeral(volume) => {
            volumes.push(volume);
            None
        }
        DataVolume::ClaimTemplate(claim) => Some(vec![claim]),
    };

    let container = Container {
        name: sts_name.to_string(),
        image: Some(spec.image.clone()),
        image_pull_policy: Some(IMAGE_PULL_POLICY.to_string()),
        command: Some(vec![M3DB_COMMAND.to_string()]),
        args: Some(vec!["-f".to_string(), configuration_file_location()]),
        env: Some(vec![EnvVar {
            name: "NAMESPACE".to_string(),
            value_from: Some(EnvVarSource {
                field_ref: Some(ObjectFieldSelector {
                    field_path: "metadata.namespace".to_string(),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }]),
        ports: Some(container_ports()),
        resources: spec.container_resources.clone(),
        security_context: spec.security_context.clone(),
        liveness_probe: Some(http_probe(PROBE_PATH_HEALTH)),
        readiness_probe: Some(http_probe(PROBE_PATH_READY)),
        volume_mounts: Some(volume_mounts),
        ..Default::default()
    };

    StatefulSet {
        metadata: ObjectMeta {
            name: Some(sts_name.to_string()),
            namespace: cluster.namespace(),
            labels: Some(sts_labels.clone()),
            annotations: Some(cluster_annotations(cluster)),
            // Garbage collected with the cluster
            owner_references: Some(vec![owner_reference(cluster)]),
            ..Default::default()
        },
        spec: Some(StatefulSetSpec {
            service_name: Some(headless_service_name(&name)),
            replicas: Some(instance_count),
            selector: LabelSelector {
                match_labels: Some(selector),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(sts_labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![container],
                    volumes: Some(volumes),
                    affinity,
                    tolerations: (!spec.tolerations.is_empty()).then(|| spec.tolerations.clone()),
                    priority_class_name: spec.priority_class_name.clone(),
                    security_context: spec.pod_security_context.clone(),
                    ..Default::default()
                }),
            },
            volume_claim_templates,
            ..Default::default()
        }),
        ..Default::default()
    }
}
