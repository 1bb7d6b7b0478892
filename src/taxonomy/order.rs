//! Sibling ordering: canonical sort, neighbor swaps, dense reordering.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::{MoveDirection, Topic};

/// Canonical sibling ordering: `order_index` ascending, then id ascending so
/// tied indexes stay deterministic.
pub fn sibling_order(a: &Topic, b: &Topic) -> Ordering {
    a.order_index
        .cmp(&b.order_index)
        .then_with(|| a.id.cmp(&b.id))
}

/// All topics sharing `parent_id` (None selects the roots), in canonical
/// order.
pub fn siblings<'a>(topics: &'a [Topic], parent_id: Option<&str>) -> Vec<&'a Topic> {
    let mut group: Vec<&Topic> = topics
        .iter()
        .filter(|t| t.parent_id.as_deref() == parent_id)
        .collect();
    group.sort_by(|a, b| sibling_order(a, b));
    group
}

/// A single pending `order_index` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWrite {
    pub id: String,
    pub order_index: i64,
}

/// Compute the pair of writes that swaps `topic_id` with its neighbor in the
/// given direction. `siblings` must already be in canonical order.
///
/// Returns None when the move is a no-op: the topic is already at the edge
/// it is moving toward, or it is not in the group at all. With tied indexes
/// the swap writes the same values back; a dense reorder restores distinct
/// indexes.
pub fn neighbor_swap(
    siblings: &[&Topic],
    topic_id: &str,
    direction: MoveDirection,
) -> Option<[OrderWrite; 2]> {
    let pos = siblings.iter().position(|t| t.id == topic_id)?;
    let neighbor_pos = match direction {
        MoveDirection::Up => pos.checked_sub(1)?,
        MoveDirection::Down => {
            if pos + 1 >= siblings.len() {
                return None;
            }
            pos + 1
        }
    };

    let topic = siblings[pos];
    let neighbor = siblings[neighbor_pos];
    Some([
        OrderWrite {
            id: topic.id.clone(),
            order_index: neighbor.order_index,
        },
        OrderWrite {
            id: neighbor.id.clone(),
            order_index: topic.order_index,
        },
    ])
}

/// Compute dense `order_index` writes (0..n-1) that arrange a sibling group
/// into `ordered_ids`.
///
/// `ordered_ids` must be a permutation of the group: same length, no
/// duplicates, every id a member. The error string names the first
/// violation found.
pub fn reorder_writes(
    siblings: &[&Topic],
    ordered_ids: &[String],
) -> Result<Vec<OrderWrite>, String> {
    if ordered_ids.len() != siblings.len() {
        return Err(format!(
            "Expected {} topic id(s) for this sibling group, got {}",
            siblings.len(),
            ordered_ids.len()
        ));
    }

    let members: HashSet<&str> = siblings.iter().map(|t| t.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for id in ordered_ids {
        if !members.contains(id.as_str()) {
            return Err(format!("Topic {} is not part of this sibling group", id));
        }
        if !seen.insert(id.as_str()) {
            return Err(format!("Topic {} appears more than once", id));
        }
    }

    Ok(ordered_ids
        .iter()
        .enumerate()
        .map(|(index, id)| OrderWrite {
            id: id.clone(),
            order_index: index as i64,
        })
        .collect())
}
