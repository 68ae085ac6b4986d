//! Default m3dbnode configuration
//!
//! Clusters that do not name their own ConfigMap get one generated by the
//! operator, with the cluster's etcd endpoints templated in. Paths and ports
//! must agree with what the StatefulSet mounts and exposes.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::ConfigMap;
use kube::ResourceExt;
use kube::core::ObjectMeta;
use tracing::debug;

use crate::controller::error::{Error, Result};
use crate::crd::M3DBCluster;
use crate::resources::common::{
    cluster_annotations, cluster_labels, cluster_name, default_config_map_name, labels,
    owner_reference,
};
use crate::resources::ports::{
    PORT_M3_COORDINATOR, PORT_M3_COORDINATOR_METRICS, PORT_M3DB_DEBUG, PORT_M3DB_HTTP_CLUSTER,
    PORT_M3DB_HTTP_NODE, PORT_M3DB_NODE_CLIENT, PORT_M3DB_NODE_CLUSTER,
};
use crate::resources::statefulset::{
    CACHE_DIRECTORY, POD_IDENTITY_DIRECTORY, POD_IDENTITY_FILE_NAME,
};
use crate::resources::volumes::{CONFIGURATION_FILE_NAME, DATA_DIRECTORY};

/// Generate the operator's default ConfigMap for a cluster
///
/// Returns `None` when the cluster names its own ConfigMap. Otherwise the
/// cluster needs a name and at least one etcd endpoint.
pub fn generate_default_config_map(cluster: &M3DBCluster) -> Result<Option<ConfigMap>> {
    if cluster.spec.config_map_name.is_some() {
        return Ok(None);
    }

    let name = cluster_name(cluster)?;
    if cluster.spec.etcd_endpoints.is_empty() {
        return Err(Error::ValidationError(format!(
            "cluster '{}' has neither a configMapName nor etcdEndpoints",
            name
        )));
    }

    let ns = cluster.namespace().unwrap_or_else(|| "default".to_string());
    let config = generate_m3_yaml(&ns, name, &cluster.spec.etcd_endpoints)?;
    let cm_name = default_config_map_name(name);

    debug!(cluster = %name, config_map = %cm_name, "Generated default configmap");

    Ok(Some(ConfigMap {
        metadata: ObjectMeta {
            name: Some(cm_name),
            namespace: cluster.namespace(),
            labels: Some(cluster_labels(cluster, labels::COMPONENT_M3DB_NODE)),
            annotations: Some(cluster_annotations(cluster)),
            owner_references: Some(vec![owner_reference(cluster)]),
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            CONFIGURATION_FILE_NAME.to_string(),
            config,
        )])),
        ..Default::default()
    }))
}

/// Render `m3.yml` for a cluster
///
/// Endpoints are written as double-quoted scalars so no character in them
/// can change the document structure.
fn generate_m3_yaml(
    namespace: &str,
    cluster_name: &str,
    etcd_endpoints: &[String],
) -> Result<String> {
    let endpoints = etcd_endpoints
        .iter()
        .map(|e| {
            serde_json::to_string(e)
                .map(|quoted| format!("            - {}", quoted))
                .map_err(|err| {
                    Error::ValidationError(format!("invalid etcd endpoint '{}': {}", e, err))
                })
        })
        .collect::<Result<Vec<_>>>()?
        .join("\n");

    Ok(format!(
        r#"coordinator:
  listenAddress: 0.0.0.0:{coordinator_port}
  metrics:
    scope:
      prefix: coordinator
    prometheus:
      handlerPath: /metrics
      listenAddress: 0.0.0.0:{coordinator_metrics_port}
    sanitization: prometheus
    samplingRate: 1.0
    extended: none
  tagOptions:
    idScheme: quoted

db:
  logging:
    level: info
  metrics:
    prometheus:
      handlerPath: /metrics
    sanitization: prometheus
    samplingRate: 1.0
    extended: detailed
  listenAddress: 0.0.0.0:{client_port}
  clusterListenAddress: 0.0.0.0:{cluster_port}
  httpNodeListenAddress: 0.0.0.0:{http_node_port}
  httpClusterListenAddress: 0.0.0.0:{http_cluster_port}
  debugListenAddress: 0.0.0.0:{debug_port}
  hostID:
    resolver: file
    file:
      path: {identity_dir}/{identity_file}
      timeout: 5m
  client:
    writeConsistencyLevel: majority
    readConsistencyLevel: unstrict_majority
  gcPercentage: 100
  writeNewSeriesAsync: true
  writeNewSeriesBackoffDuration: 2ms
  commitlog:
    flushMaxBytes: 524288
    flushEvery: 1s
    queue:
      calculationType: fixed
      size: 2097152
  fs:
    filePathPrefix: {data_dir}
  config:
    service:
      env: {namespace}/{cluster_name}
      zone: embedded
      service: m3db
      cacheDir: {cache_dir}
      etcdClusters:
        - zone: embedded
          endpoints:
{endpoints}
"#,
        coordinator_port = PORT_M3_COORDINATOR,
        coordinator_metrics_port = PORT_M3_COORDINATOR_METRICS,
        client_port = PORT_M3DB_NODE_CLIENT,
        cluster_port = PORT_M3DB_NODE_CLUSTER,
        http_node_port = PORT_M3DB_HTTP_NODE,
        http_cluster_port = PORT_M3DB_HTTP_CLUSTER,
        debug_port = PORT_M3DB_DEBUG,
        identity_dir = POD_IDENTITY_DIRECTORY,
        identity_file = POD_IDENTITY_FILE_NAME,
        data_dir = DATA_DIRECTORY.trim_end_matches('/'),
        cache_dir = CACHE_DIRECTORY.trim_end_matches('/'),
        namespace = namespace,
        cluster_name = cluster_name,
        endpoints = endpoints,
    ))
}
