//! Network ports exposed by m3dbnode
//!
//! The coordinator runs inside the m3dbnode process, so the data node table
//! includes the coordinator ports and the coordinator table is a subset.

use k8s_openapi::api::core::v1::{ContainerPort, ServicePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

pub const PORT_M3DB_NODE_CLIENT: i32 = 9000;
pub const PORT_M3DB_NODE_CLUSTER: i32 = 9001;
pub const PORT_M3DB_HTTP_NODE: i32 = 9002;
pub const PORT_M3DB_HTTP_CLUSTER: i32 = 9003;
pub const PORT_M3DB_DEBUG: i32 = 9004;
pub const PORT_M3_COORDINATOR: i32 = 7201;
pub const PORT_M3_COORDINATOR_METRICS: i32 = 7203;

const PROTOCOL_TCP: &str = "TCP";

/// A named port and its transport protocol
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NamedPort {
    pub name: &'static str,
    pub port: i32,
    pub protocol: &'static str,
}

/// Ports served by every m3dbnode container
pub const M3DB_NODE_PORTS: [NamedPort; 7] = [
    NamedPort { name: "client", port: PORT_M3DB_NODE_CLIENT, protocol: PROTOCOL_TCP },
    NamedPort { name: "cluster", port: PORT_M3DB_NODE_CLUSTER, protocol: PROTOCOL_TCP },
    NamedPort { name: "http-node", port: PORT_M3DB_HTTP_NODE, protocol: PROTOCOL_TCP },
    NamedPort { name: "http-cluster", port: PORT_M3DB_HTTP_CLUSTER, protocol: PROTOCOL_TCP },
    NamedPort { name: "debug", port: PORT_M3DB_DEBUG, protocol: PROTOCOL_TCP },
    NamedPort { name: "coordinator", port: PORT_M3_COORDINATOR, protocol: PROTOCOL_TCP },
    NamedPort { name: "coord-metrics", port: PORT_M3_COORDINATOR_METRICS, protocol: PROTOCOL_TCP },
];

/// Ports exposed by the coordinator service
pub const COORDINATOR_PORTS: [NamedPort; 2] = [
    NamedPort { name: "coordinator", port: PORT_M3_COORDINATOR, protocol: PROTOCOL_TCP },
    NamedPort { name: "coord-metrics", port: PORT_M3_COORDINATOR_METRICS, protocol: PROTOCOL_TCP },
];

fn service_ports(ports: &[NamedPort]) -> Vec<ServicePort> {
    ports
        .iter()
        .map(|p| ServicePort {
            name: Some(p.name.to_string()),
            port: p.port,
            target_port: Some(IntOrString::Int(p.port)),
            protocol: Some(p.protocol.to_string()),
            ..Default::default()
        })
        .collect()
}

/// Container ports for the m3dbnode container
pub fn container_ports() -> Vec<ContainerPort> {
    M3DB_NODE_PORTS
        .iter()
        .map(|p| ContainerPort {
            name: Some(p.name.to_string()),
            container_port: p.port,
            protocol: Some(p.protocol.to_string()),
            ..Default::default()
        })
        .collect()
}

/// Service ports for the headless data node service
pub fn m3db_service_ports() -> Vec<ServicePort> {
    service_ports(&M3DB_NODE_PORTS)
}

/// Service ports for the coordinator service
pub fn coordinator_service_ports() -> Vec<ServicePort> {
    service_ports(&COORDINATOR_PORTS)
}
