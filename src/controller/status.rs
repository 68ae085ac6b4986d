//! Status conditions for M3DBCluster resources
//!
//! Conditions record lifecycle milestones of a cluster. The list holds at
//! most one condition per type; `update_condition` is the only way entries
//! are added, which keeps that true. Any status may follow any other.

use chrono::Utc;
use tracing::debug;

use crate::crd::{ClusterCondition, ConditionStatus, M3DBCluster, M3DBClusterStatus};

/// Known condition types. The set is open; other types are stored as-is.
pub mod condition_types {
    /// An initial placement has been created for the cluster
    pub const PLACEMENT_INITIALIZED: &str = "PlacementInitialized";
    /// A pod is currently bootstrapping
    pub const POD_BOOTSTRAPPING: &str = "PodBootstrapping";
}

impl ClusterCondition {
    /// Create a condition with both timestamps set to now
    pub fn new(type_: &str, status: ConditionStatus, reason: &str, message: &str) -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            type_: type_.to_string(),
            status,
            last_update_time: now.clone(),
            last_transition_time: now,
            reason: reason.to_string(),
            message: message.to_string(),
        }
    }
}

impl M3DBClusterStatus {
    /// Replace the condition of the same type in place, or append it
    pub fn update_condition(&mut self, condition: ClusterCondition) {
        match self
            .conditions
            .iter_mut()
            .find(|c| c.type_ == condition.type_)
        {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
    }

    /// Get the condition of the given type
    pub fn get_condition(&self, type_: &str) -> Option<&ClusterCondition> {
        self.conditions.iter().find(|c| c.type_ == type_)
    }

    /// Whether a condition of the given type exists with status True
    pub fn has_condition_true(&self, type_: &str) -> bool {
        self.get_condition(type_)
            .is_some_and(|c| c.status == ConditionStatus::True)
    }

    /// Whether an initial placement has been created
    pub fn has_initialized_placement(&self) -> bool {
        self.has_condition_true(condition_types::PLACEMENT_INITIALIZED)
    }

    /// Whether a pod is currently bootstrapping
    pub fn has_pod_bootstrapping(&self) -> bool {
        self.has_condition_true(condition_types::POD_BOOTSTRAPPING)
    }

    /// Set a condition, stamping the update time
    ///
    /// The transition time only moves when the status changes.
    pub fn set_condition(
        &mut self,
        type_: &str,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) {
        let mut condition = ClusterCondition::new(type_, status, reason, message);

        if let Some(existing) = self.get_condition(type_) {
            if existing.status == status {
                condition.last_transition_time = existing.last_transition_time.clone();
            } else {
                debug!(
                    condition = type_,
                    from = %existing.status,
                    to = %status,
                    "Condition transitioned"
                );
            }
        }

        self.update_condition(condition);
    }
}

/// Check if the cluster changed since the operator last observed it
pub fn spec_changed(cluster: &M3DBCluster) -> bool {
    let observed = cluster.status.as_ref().and_then(|s| s.observed_generation);
    cluster.metadata.generation != observed
}
