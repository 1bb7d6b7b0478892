//! Effective visibility: a topic shows on public surfaces only while it and
//! every ancestor are active.

use std::collections::HashMap;

use crate::models::{Topic, TopicStatus};

use super::MAX_LEVEL;

/// True when `topic` is active and so is every ancestor on its parent chain.
///
/// A dangling `parent_id` does not hide the topic: a missing ancestor is
/// treated as a detached root rather than a hidden one. The upward walk is
/// capped at [`MAX_LEVEL`] hops; rows that need more are malformed cyclic
/// data and resolve to hidden.
pub fn is_effectively_visible(topic: &Topic, by_id: &HashMap<&str, &Topic>) -> bool {
    if topic.status != TopicStatus::Active {
        return false;
    }

    let mut current = topic.parent_id.as_deref();
    let mut hops = 0;
    while let Some(parent_id) = current {
        if hops >= MAX_LEVEL {
            return false;
        }
        hops += 1;

        let Some(parent) = by_id.get(parent_id) else {
            return true;
        };
        if parent.status != TopicStatus::Active {
            return false;
        }
        current = parent.parent_id.as_deref();
    }

    true
}

/// The effectively visible subset of `topics`, in input order.
pub fn filter_visible(topics: &[Topic]) -> Vec<&Topic> {
    let by_id: HashMap<&str, &Topic> = topics.iter().map(|t| (t.id.as_str(), t)).collect();
    topics
        .iter()
        .filter(|t| is_effectively_visible(t, &by_id))
        .collect()
}
