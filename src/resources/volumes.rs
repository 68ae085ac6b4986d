//! Configuration and data volumes for m3dbnode pods

use k8s_openapi::api::core::v1::{
    ConfigMapVolumeSource, EmptyDirVolumeSource, PersistentVolumeClaim, Volume, VolumeMount,
};

use crate::crd::{IsolationGroup, M3DBCluster};
use crate::resources::common::default_config_map_name;

/// Data directory of m3dbnode
pub const DATA_DIRECTORY: &str = "/var/lib/m3db/";
pub const DATA_VOLUME_NAME: &str = "m3db-data";

/// Directory holding `m3.yml`
pub const CONFIGURATION_DIRECTORY: &str = "/etc/m3db/";
pub const CONFIGURATION_VOLUME_NAME: &str = "m3-configuration";
pub const CONFIGURATION_FILE_NAME: &str = "m3.yml";

/// Path of the configuration file passed to m3dbnode with `-f`
pub fn configuration_file_location() -> String {
    format!("{}{}", CONFIGURATION_DIRECTORY, CONFIGURATION_FILE_NAME)
}

/// The configuration volume and where it is mounted
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigVolume {
    pub volume: Volume,
    pub mount: VolumeMount,
}

/// Where an isolation group keeps its data
#[derive(Clone, Debug, PartialEq)]
pub enum DataVolume {
    /// An emptyDir that is wiped when the pod is rescheduled
    Ephemeral(Volume),
    /// A claim template for the StatefulSet's `volumeClaimTemplates`
    ClaimTemplate(PersistentVolumeClaim),
}

/// Bind the configuration volume to the user's ConfigMap, or to the
/// operator's default one when none is set
pub fn config_volume(cluster: &M3DBCluster) -> ConfigVolume {
    let config_map_name = cluster.spec.config_map_name.clone().unwrap_or_else(|| {
        default_config_map_name(cluster.metadata.name.as_deref().unwrap_or_default())
    });

    ConfigVolume {
        volume: Volume {
            name: CONFIGURATION_VOLUME_NAME.to_string(),
            config_map: Some(ConfigMapVolumeSource {
                name: config_map_name,
                ..Default::default()
            }),
            ..Default::default()
        },
        mount: VolumeMount {
            name: CONFIGURATION_VOLUME_NAME.to_string(),
            mount_path: CONFIGURATION_DIRECTORY.to_string(),
            ..Default::default()
        },
    }
}

/// Choose the data volume for an isolation group
///
/// Without a claim template the data lives in an emptyDir. With one, the
/// template is cloned, renamed to the data volume and, if the group sets a
/// non-empty storage class, given that storage class. The cluster's template is shared
/// by all groups and never modified.
pub fn data_volume(cluster: &M3DBCluster, group: &IsolationGroup) -> DataVolume {
    let Some(template) = cluster.spec.data_dir_volume_claim_template.as_ref() else {
        return DataVolume::Ephemeral(Volume {
            name: DATA_VOLUME_NAME.to_string(),
            empty_dir: Some(EmptyDirVolumeSource::default()),
            ..Default::default()
        });
    };

    let mut claim = template.clone();
    claim.metadata.name = Some(DATA_VOLUME_NAME.to_string());
    // An empty storage class counts as unset
    if let Some(storage_class) = group.storage_class_name.as_deref().filter(|s| !s.is_empty()) {
        claim.spec.get_or_insert_with(Default::default).storage_class_name =
            Some(storage_class.to_string());
    }

    DataVolume::ClaimTemplate(claim)
}

/// Mount for the data volume, whichever kind it is
pub fn data_volume_mount() -> VolumeMount {
    VolumeMount {
        name: DATA_VOLUME_NAME.to_string(),
        mount_path: DATA_DIRECTORY.to_string(),
        ..Default::default()
    }
}
