//! In-memory topic store used by service-level tests.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{RevisionInfo, Topic, TopicStatus};

use super::{NewTopic, TopicPatch, TopicStore};

/// Vec-backed [`TopicStore`] that mirrors the SQLite repository's observable
/// behavior: canonical read order and a revision bump per write.
pub struct MemoryTopicStore {
    inner: Mutex<Inner>,
}

struct Inner {
    topics: Vec<Topic>,
    revision_id: i64,
    generated_at: String,
}

impl MemoryTopicStore {
    pub fn new() -> Self {
        MemoryTopicStore {
            inner: Mutex::new(Inner {
                topics: Vec::new(),
                revision_id: 0,
                generated_at: Utc::now().to_rfc3339(),
            }),
        }
    }
}

impl Inner {
    fn bump(&mut self) {
        self.revision_id += 1;
        self.generated_at = Utc::now().to_rfc3339();
    }

    fn sorted(&self) -> Vec<Topic> {
        let mut topics = self.topics.clone();
        // Matches the repository's ORDER BY parent_id, order_index, id;
        // Option's None-first ordering lines up with SQL NULLs-first.
        topics.sort_by(|a, b| {
            a.parent_id
                .cmp(&b.parent_id)
                .then_with(|| a.order_index.cmp(&b.order_index))
                .then_with(|| a.id.cmp(&b.id))
        });
        topics
    }
}

#[async_trait]
impl TopicStore for MemoryTopicStore {
    async fn fetch_all(&self) -> Result<Vec<Topic>, AppError> {
        Ok(self.inner.lock().await.sorted())
    }

    async fn fetch_by_status(&self, status: TopicStatus) -> Result<Vec<Topic>, AppError> {
        Ok(self
            .inner
            .lock()
            .await
            .sorted()
            .into_iter()
            .filter(|t| t.status == status)
            .collect())
    }

    async fn insert(&self, new: NewTopic) -> Result<Topic, AppError> {
        let mut inner = self.inner.lock().await;
        let topic = Topic {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            slug: new.slug,
            description: new.description,
            status: new.status,
            parent_id: new.parent_id,
            level: new.level,
            order_index: new.order_index,
            created_at: Utc::now().to_rfc3339(),
        };
        inner.topics.push(topic.clone());
        inner.bump();
        Ok(topic)
    }

    async fn update_by_id(&self, id: &str, patch: TopicPatch) -> Result<Topic, AppError> {
        let mut inner = self.inner.lock().await;
        let Some(topic) = inner.topics.iter_mut().find(|t| t.id == id) else {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        };

        if let Some(name) = patch.name {
            topic.name = name;
        }
        if let Some(slug) = patch.slug {
            topic.slug = slug;
        }
        if let Some(description) = patch.description {
            topic.description = Some(description);
        }
        if let Some(status) = patch.status {
            topic.status = status;
        }
        if let Some(parent_id) = patch.parent_id {
            topic.parent_id = parent_id;
        }
        if let Some(level) = patch.level {
            topic.level = level;
        }
        if let Some(order_index) = patch.order_index {
            topic.order_index = order_index;
        }

        let updated = topic.clone();
        inner.bump();
        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.lock().await;
        let before = inner.topics.len();
        inner.topics.retain(|t| t.id != id);
        if inner.topics.len() == before {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }
        inner.bump();
        Ok(())
    }

    async fn revision(&self) -> Result<RevisionInfo, AppError> {
        let inner = self.inner.lock().await;
        Ok(RevisionInfo {
            revision_id: inner.revision_id,
            generated_at: inner.generated_at.clone(),
        })
    }
}
