//! Record store boundary. The taxonomy service talks to persistence through
//! [`TopicStore`] so the SQLite repository and the in-memory store used by
//! unit tests are interchangeable.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{RevisionInfo, Topic, TopicStatus};

#[cfg(test)]
mod memory;

#[cfg(test)]
pub use memory::MemoryTopicStore;

/// Fields for a topic about to be created. The store assigns the id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: TopicStatus,
    pub parent_id: Option<String>,
    pub level: i64,
    pub order_index: i64,
}

/// Partial update for an existing topic. `None` keeps the stored value;
/// `parent_id` is doubly optional because moving to the root level writes an
/// explicit NULL.
#[derive(Debug, Clone, Default)]
pub struct TopicPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub status: Option<TopicStatus>,
    pub parent_id: Option<Option<String>>,
    pub level: Option<i64>,
    pub order_index: Option<i64>,
}

/// Async persistence interface for topic records.
///
/// Reads return topics in canonical order (parent, then `order_index`, then
/// id). Every successful write bumps the store revision so clients can skip
/// refetching an unchanged taxonomy.
#[async_trait]
pub trait TopicStore: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Topic>, AppError>;

    async fn fetch_by_status(&self, status: TopicStatus) -> Result<Vec<Topic>, AppError>;

    async fn insert(&self, new: NewTopic) -> Result<Topic, AppError>;

    async fn update_by_id(&self, id: &str, patch: TopicPatch) -> Result<Topic, AppError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;

    async fn revision(&self) -> Result<RevisionInfo, AppError>;
}
