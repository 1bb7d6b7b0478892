//! Topic tree builder: flat rows into an ordered forest.

use std::collections::HashMap;

use crate::models::{Topic, TopicNode};

use super::sibling_order;

/// Build the forest of [`TopicNode`] from a flat topic list.
///
/// Two passes: index every topic by id, then group children under their
/// parents. Topics with a null `parent_id`, and topics whose parent is absent
/// from the input (orphans), become roots; an orphan reference never drops
/// data and never fails. Children are ordered by `(order_index, id)`.
///
/// Rows whose ancestry forms a cycle are unreachable from any root and are
/// left out of the forest; assembly still terminates because every topic has
/// a single parent and is therefore visited at most once.
pub fn build_tree(topics: &[Topic]) -> Vec<TopicNode> {
    let by_id: HashMap<&str, &Topic> = topics.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut children: HashMap<&str, Vec<&Topic>> = HashMap::new();
    let mut roots: Vec<&Topic> = Vec::new();

    for topic in topics {
        match topic.parent_id.as_deref() {
            Some(parent_id) if by_id.contains_key(parent_id) => {
                children.entry(parent_id).or_default().push(topic);
            }
            _ => roots.push(topic),
        }
    }

    roots.sort_by(|a, b| sibling_order(a, b));
    for group in children.values_mut() {
        group.sort_by(|a, b| sibling_order(a, b));
    }

    roots.iter().map(|t| assemble(t, &children)).collect()
}

/// Pre-order traversal over a forest: each topic before its children,
/// children in sibling order.
pub fn flatten<'a>(nodes: &'a [TopicNode]) -> Vec<&'a Topic> {
    let mut out = Vec::new();
    for node in nodes {
        push_preorder(node, &mut out);
    }
    out
}

fn push_preorder<'a>(node: &'a TopicNode, out: &mut Vec<&'a Topic>) {
    out.push(&node.topic);
    for child in &node.children {
        push_preorder(child, out);
    }
}

fn assemble(topic: &Topic, children: &HashMap<&str, Vec<&Topic>>) -> TopicNode {
    let kids = children
        .get(topic.id.as_str())
        .map(|group| group.iter().map(|t| assemble(t, children)).collect())
        .unwrap_or_default();

    TopicNode {
        topic: topic.clone(),
        children: kids,
    }
}
