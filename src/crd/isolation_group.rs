//! Lookup and ordering helpers for isolation groups
//!
//! Isolation groups are kept as a plain ordered `Vec` on the cluster spec.
//! Insertion order is significant: a group's position names its StatefulSet.

use crate::crd::IsolationGroup;

/// Find an isolation group by name. The first match wins when names repeat.
pub fn find_isolation_group<'a>(
    groups: &'a [IsolationGroup],
    name: &str,
) -> Option<&'a IsolationGroup> {
    isolation_group_position(groups, name).map(|(_, group)| group)
}

/// Find an isolation group by name along with its index in the list
pub fn isolation_group_position<'a>(
    groups: &'a [IsolationGroup],
    name: &str,
) -> Option<(usize, &'a IsolationGroup)> {
    groups.iter().enumerate().find(|(_, g)| g.name == name)
}

/// Sort isolation groups by name
pub fn sort_isolation_groups(groups: &mut [IsolationGroup]) {
    groups.sort_by(|a, b| a.name.cmp(&b.name));
}
