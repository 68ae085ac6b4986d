//! Unit tests for status management

use m3db_operator::controller::status::{condition_types, spec_changed};
use m3db_operator::crd::{ClusterCondition, ConditionStatus, M3DBClusterStatus};

use crate::common::*;

fn status_with(conditions: Vec<ClusterCondition>) -> M3DBClusterStatus {
    M3DBClusterStatus {
        conditions,
        ..Default::default()
    }
}

#[test]
fn test_update_condition_replaces_not_duplicates() {
    let mut status = M3DBClusterStatus::default();

    status.update_condition(ClusterCondition::new(
        condition_types::POD_BOOTSTRAPPING,
        ConditionStatus::True,
        "Bootstrapping",
        "",
    ));
    assert!(status.has_pod_bootstrapping());

    status.update_condition(ClusterCondition::new(
        condition_types::POD_BOOTSTRAPPING,
        ConditionStatus::False,
        "Bootstrapped",
        "",
    ));

    let matching: Vec<_> = status
        .conditions
        .iter()
        .filter(|c| c.type_ == condition_types::POD_BOOTSTRAPPING)
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].status, ConditionStatus::False);
    assert!(!status.has_pod_bootstrapping());
}

#[test]
fn test_update_condition_keeps_other_types() {
    let mut status = status_with(vec![
        ClusterCondition::new(
            condition_types::PLACEMENT_INITIALIZED,
            ConditionStatus::True,
            "",
            "",
        ),
        ClusterCondition::new("Custom", ConditionStatus::Unknown, "", ""),
    ]);

    status.update_condition(ClusterCondition::new(
        "Custom",
        ConditionStatus::True,
        "",
        "",
    ));

    assert_eq!(status.conditions.len(), 2);
    assert!(status.has_initialized_placement());
    assert!(status.has_condition_true("Custom"));
}

#[test]
fn test_any_transition_allowed() {
    let mut status = M3DBClusterStatus::default();
    for s in [
        ConditionStatus::True,
        ConditionStatus::Unknown,
        ConditionStatus::False,
        ConditionStatus::True,
    ] {
        status.set_condition(condition_types::PLACEMENT_INITIALIZED, s, "", "");
        assert_eq!(
            status
                .get_condition(condition_types::PLACEMENT_INITIALIZED)
                .unwrap()
                .status,
            s
        );
    }
    assert_eq!(status.conditions.len(), 1);
}

#[test]
fn test_missing_condition() {
    let status = M3DBClusterStatus::default();
    assert!(status.get_condition("Missing").is_none());
    assert!(!status.has_condition_true("Missing"));
    assert!(!status.has_initialized_placement());
    assert!(!status.has_pod_bootstrapping());
}

#[test]
fn test_new_condition_timestamps() {
    let c = ClusterCondition::new("A", ConditionStatus::True, "r", "m");
    assert!(!c.last_update_time.is_empty());
    assert_eq!(c.last_update_time, c.last_transition_time);
    assert!(chrono::DateTime::parse_from_rfc3339(&c.last_update_time).is_ok());
}

#[test]
fn test_spec_changed() {
    let cluster = M3DBClusterBuilder::new("cluster-a", "default")
        .with_generation(2)
        .build();
    assert!(spec_changed(&cluster));

    let observed = M3DBClusterBuilder::new("cluster-a", "default")
        .with_generation(2)
        .with_status(M3DBClusterStatus {
            observed_generation: Some(2),
            ..Default::default()
        })
        .build();
    assert!(!spec_changed(&observed));

    let stale = M3DBClusterBuilder::new("cluster-a", "default")
        .with_generation(3)
        .with_status(M3DBClusterStatus {
            observed_generation: Some(2),
            ..Default::default()
        })
        .build();
    assert!(spec_changed(&stale));
}
