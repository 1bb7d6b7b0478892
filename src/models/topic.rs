//! Topic model matching the frontend Topic interface.

use serde::{Deserialize, Serialize};

/// Display status of a topic. Admins toggle this freely in both directions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TopicStatus {
    Active,
    Hidden,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Active => "active",
            TopicStatus::Hidden => "hidden",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(TopicStatus::Active),
            "hidden" => Some(TopicStatus::Hidden),
            _ => None,
        }
    }
}

/// A node in the content category taxonomy.
///
/// Topics form a forest via `parent_id`; `level` is 0 for roots and
/// parent + 1 otherwise, bounded at 3 levels total. `order_index` ranks a
/// topic among siblings sharing the same `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TopicStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub level: i64,
    pub order_index: i64,
    pub created_at: String,
}

/// A topic with its ordered children, derived from the flat list on demand.
///
/// Never persisted and never cached across requests; the record store is the
/// sole source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    pub topic: Topic,
    pub children: Vec<TopicNode>,
}

/// Direction for a sibling move operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Request body for creating a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub name: String,
    /// Omitted slugs are generated from `name`.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: TopicStatus,
    /// Omitted or null places the topic at root.
    #[serde(default)]
    pub parent_id: Option<String>,
}

fn default_status() -> TopicStatus {
    TopicStatus::Active
}

/// Request body for updating an existing topic.
///
/// Parent changes go through the dedicated reparent operation so placement
/// validation cannot be bypassed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TopicStatus>,
}

/// Request body for re-parenting a topic. Omitted or null moves it to root.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReparentTopicRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Request body for moving a topic among its siblings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTopicRequest {
    pub direction: MoveDirection,
}

/// Request body for reordering one sibling group.
///
/// `ordered_ids` must be a permutation of the current children of
/// `parent_id`; they receive dense order indexes 0..n-1 in the given order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderTopicsRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
    pub ordered_ids: Vec<String>,
}
