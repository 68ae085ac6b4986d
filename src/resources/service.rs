//! Service generation for M3DB clusters
//!
//! Two services front every cluster:
//! - a headless service giving each m3dbnode pod a stable DNS name
//! - a ClusterIP service for the coordinator API
//!
//! The coordinator runs inside m3dbnode, so the coordinator service selects
//! data node pods while being labeled as the coordinator component.

use k8s_openapi::api::core::v1::{Service, ServiceSpec};
use kube::ResourceExt;
use kube::core::ObjectMeta;
use tracing::debug;

use crate::controller::error::Result;
use crate::crd::M3DBCluster;
use crate::resources::common::{
    cluster_annotations, cluster_labels, cluster_name, coordinator_service_name,
    headless_service_name, labels, owner_reference, selector_labels,
};
use crate::resources::ports::{coordinator_service_ports, m3db_service_ports};

/// Generate the headless service for the m3dbnode StatefulSets
///
/// Fails with `ValidationError` if the cluster has no name.
pub fn generate_m3db_service(cluster: &M3DBCluster) -> Result<Service> {
    let name = cluster_name(cluster)?;
    let svc_name = headless_service_name(name);

    debug!(cluster = %name, service = %svc_name, "Generated m3dbnode service");

    Ok(Service {
        metadata: ObjectMeta {
            name: Some(svc_name),
            namespace: cluster.namespace(),
            labels: Some(cluster_labels(cluster, labels::COMPONENT_M3DB_NODE)),
            annotations: Some(cluster_annotations(cluster)),
            owner_references: Some(vec![owner_reference(cluster)]),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            selector: Some(selector_labels(name, labels::COMPONENT_M3DB_NODE)),
            ports: Some(m3db_service_ports()),
            type_: Some("ClusterIP".to_string()),
            cluster_ip: Some("None".to_string()), // Headless service
            ..Default::default()
        }),
        ..Default::default()
    })
}

/// Generate the coordinator service
///
/// Fails with `ValidationError` if the cluster has no name.
pub fn generate_coordinator_service(cluster: &M3DBCluster) -> Result<Service> {
    let name = cluster_name(cluster)?;
    let svc_name = coordinator_service_name(name);

    debug!(cluster = %name, service = %svc_name, "Generated coordinator service");

    Ok(Service {
        metadata: ObjectMeta {
            name: Some(svc_name),
            namespace: cluster.namespace(),
            labels: Some(cluster_labels(cluster, labels::COMPONENT_COORDINATOR)),
            owner_references: Some(vec![owner_reference(cluster)]),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            // Coordinator endpoints are served by the data nodes
            selector: Some(selector_labels(name, labels::COMPONENT_M3DB_NODE)),
            ports: Some(coordinator_service_ports()),
            type_: Some("ClusterIP".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    })
}
