pub mod affinity;
pub mod common;
pub mod config_map;
pub mod ports;
pub mod service;
pub mod statefulset;
pub mod volumes;

pub use affinity::generate_statefulset_affinity;
pub use common::{API_VERSION, KIND, cluster_labels, owner_reference, selector_labels};
pub use config_map::generate_default_config_map;
pub use service::{generate_coordinator_service, generate_m3db_service};
pub use statefulset::{generate_statefulset, generate_statefulsets};
