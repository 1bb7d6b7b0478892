//! Topic placement validation: cycle guard, parent existence, depth bound.

use std::collections::HashMap;

use crate::models::Topic;

use super::MAX_LEVEL;

/// Why a proposed placement was rejected.
///
/// Callers surface the specific reason to the admin UI instead of a blanket
/// failure; [`PlacementError::reason`] is the stable tag carried in error
/// response details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The proposed parent is the topic itself or one of its descendants.
    Cycle {
        topic_id: String,
        proposed_parent_id: String,
    },
    /// The proposed parent does not exist in the snapshot.
    ParentMissing { proposed_parent_id: String },
    /// The placement would push the subtree past the depth ceiling.
    DepthExceeded { new_level: i64, subtree_depth: i64 },
}

impl PlacementError {
    pub fn reason(&self) -> &'static str {
        match self {
            PlacementError::Cycle { .. } => "CYCLE_DETECTED",
            PlacementError::ParentMissing { .. } => "PARENT_MISSING",
            PlacementError::DepthExceeded { .. } => "DEPTH_EXCEEDED",
        }
    }
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::Cycle {
                topic_id,
                proposed_parent_id,
            } => write!(
                f,
                "Cannot place topic {} under {}: the proposed parent is the topic itself or one of its descendants",
                topic_id, proposed_parent_id
            ),
            PlacementError::ParentMissing { proposed_parent_id } => {
                write!(f, "Proposed parent {} does not exist", proposed_parent_id)
            }
            PlacementError::DepthExceeded {
                new_level,
                subtree_depth,
            } => write!(
                f,
                "Placement at level {} with a subtree {} level(s) deep would exceed the maximum of {} levels",
                new_level,
                subtree_depth,
                MAX_LEVEL + 1
            ),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Decide whether `topic_id` may be placed under `proposed_parent`, returning
/// the topic's new level on success.
///
/// Checks run in a fixed order: root placement is always legal; then the
/// cycle guard walks upward from the proposed parent and rejects if it ever
/// reaches the topic itself; then the proposed parent must exist; finally
/// `new_level + subtree_depth` must fit within [`MAX_LEVEL`].
///
/// Pure decision function over the given snapshot. It must be called, and
/// honored, before any write: nothing here touches the store.
pub fn check_placement(
    topics: &[Topic],
    topic_id: &str,
    proposed_parent: Option<&str>,
) -> Result<i64, PlacementError> {
    let Some(parent_id) = proposed_parent else {
        return Ok(0);
    };

    let by_id: HashMap<&str, &Topic> = topics.iter().map(|t| (t.id.as_str(), t)).collect();

    // Cycle guard. Step-bounded so malformed cyclic data cannot hang the
    // walk; a well-formed chain ends at a root long before the bound.
    let mut current = Some(parent_id);
    for _ in 0..=topics.len() {
        let Some(id) = current else { break };
        if id == topic_id {
            return Err(PlacementError::Cycle {
                topic_id: topic_id.to_string(),
                proposed_parent_id: parent_id.to_string(),
            });
        }
        current = by_id.get(id).and_then(|t| t.parent_id.as_deref());
    }

    let Some(parent) = by_id.get(parent_id) else {
        return Err(PlacementError::ParentMissing {
            proposed_parent_id: parent_id.to_string(),
        });
    };

    let new_level = parent.level + 1;
    let depth = subtree_depth(topics, topic_id);
    if new_level + depth > MAX_LEVEL {
        return Err(PlacementError::DepthExceeded {
            new_level,
            subtree_depth: depth,
        });
    }

    Ok(new_level)
}

/// Boolean convenience over [`check_placement`].
pub fn can_place(topics: &[Topic], topic_id: &str, proposed_parent: Option<&str>) -> bool {
    check_placement(topics, topic_id, proposed_parent).is_ok()
}

/// Validate creating a brand-new leaf under `parent_id`, returning the
/// child's level. A new topic has no subtree, so only parent existence and
/// the level bound apply.
pub fn check_new_child(topics: &[Topic], parent_id: &str) -> Result<i64, PlacementError> {
    let Some(parent) = topics.iter().find(|t| t.id == parent_id) else {
        return Err(PlacementError::ParentMissing {
            proposed_parent_id: parent_id.to_string(),
        });
    };

    let new_level = parent.level + 1;
    if new_level > MAX_LEVEL {
        return Err(PlacementError::DepthExceeded {
            new_level,
            subtree_depth: 0,
        });
    }

    Ok(new_level)
}

/// Maximum number of levels below `topic_id` in its current subtree: 0 for a
/// leaf, 1 + the deepest child subtree otherwise.
///
/// The recursion carries a depth budget of [`MAX_LEVEL`] so malformed cyclic
/// data terminates; any subtree that exhausts the budget is already too deep
/// for every non-root placement.
pub fn subtree_depth(topics: &[Topic], topic_id: &str) -> i64 {
    let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
    for t in topics {
        if let Some(parent_id) = t.parent_id.as_deref() {
            children.entry(parent_id).or_default().push(t.id.as_str());
        }
    }

    depth_below(topic_id, &children, MAX_LEVEL)
}

fn depth_below(id: &str, children: &HashMap<&str, Vec<&str>>, budget: i64) -> i64 {
    if budget == 0 {
        return 0;
    }
    children
        .get(id)
        .map(|kids| {
            kids.iter()
                .map(|kid| 1 + depth_below(kid, children, budget - 1))
                .max()
                .unwrap_or(0)
        })
        .unwrap_or(0)
}
