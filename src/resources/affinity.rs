//! Node affinity for isolation groups
//!
//! Each isolation group pins its StatefulSet to nodes through a required node
//! affinity. All terms of a group must match (one `NodeSelectorTerm` with one
//! `In` expression per term); any value of a term satisfies it.

use k8s_openapi::api::core::v1::{
    Affinity, NodeAffinity, NodeSelector, NodeSelectorRequirement, NodeSelectorTerm,
};

use crate::controller::error::{Error, Result};
use crate::crd::IsolationGroup;

const OPERATOR_IN: &str = "In";

/// Generate the required node affinity for an isolation group
///
/// Returns `None` for a group without terms: it may run on any node.
pub fn generate_statefulset_affinity(group: &IsolationGroup) -> Result<Option<Affinity>> {
    if group.node_affinity_terms.is_empty() {
        return Ok(None);
    }

    let mut expressions = Vec::with_capacity(group.node_affinity_terms.len());
    for term in &group.node_affinity_terms {
        if term.key.is_empty() {
            return Err(Error::ValidationError(format!(
                "node affinity term in isolation group '{}' has an empty key",
                group.name
            )));
        }
        if term.values.is_empty() {
            return Err(Error::ValidationError(format!(
                "node affinity term '{}' in isolation group '{}' has no values",
                term.key, group.name
            )));
        }

        expressions.push(NodeSelectorRequirement {
            key: term.key.clone(),
            operator: OPERATOR_IN.to_string(),
            values: Some(term.values.clone()),
        });
    }

    Ok(Some(Affinity {
        node_affinity: Some(NodeAffinity {
            required_during_scheduling_ignored_during_execution: Some(NodeSelector {
                node_selector_terms: vec![NodeSelectorTerm {
                    match_expressions: Some(expressions),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        }),
        ..Default::default()
    }))
}
