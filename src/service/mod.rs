//! Topic service façade: the single entry point for taxonomy operations.
//!
//! Every mutating operation validates against a fresh snapshot from the
//! record store, then persists through it. Multi-step writes (the sibling
//! swap, reparent re-leveling, dense reorders) are not atomic: a failure
//! mid-sequence leaves whatever intermediate state the failed store call
//! produced, and nothing retries. The [`TopicStore`] boundary is where a
//! transactional backend could tighten that without touching callers.
//!
//! Validation reads can go stale before the corresponding write lands; the
//! last write wins per row. [`TopicService::with_serialized_writes`] is the
//! opt-in variant that funnels mutations through one async mutex for
//! installations that want writes serialized.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::errors::AppError;
use crate::models::{
    CreateTopicRequest, MoveDirection, RevisionInfo, TaxonomySnapshot, Topic, TopicNode,
    TopicStatus, UpdateTopicRequest,
};
use crate::slug::slugify;
use crate::store::{NewTopic, TopicPatch, TopicStore};
use crate::taxonomy;

/// The taxonomy façade. API handlers go through this type only; nothing else
/// talks to the store.
pub struct TopicService {
    store: Arc<dyn TopicStore>,
    write_lock: Option<Mutex<()>>,
}

impl TopicService {
    /// Baseline construction: mutations are not serialized, matching the
    /// permissive behavior of the platform this service fronts.
    pub fn new(store: Arc<dyn TopicStore>) -> Self {
        Self {
            store,
            write_lock: None,
        }
    }

    /// Serialize every mutating operation through one async mutex. Reads stay
    /// concurrent; under a single caller nothing observable differs from
    /// [`TopicService::new`].
    #[allow(dead_code)]
    pub fn with_serialized_writes(store: Arc<dyn TopicStore>) -> Self {
        Self {
            store,
            write_lock: Some(Mutex::new(())),
        }
    }

    async fn write_guard(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    /// Create a topic, at root or under an existing parent.
    ///
    /// The name is required; a missing or blank slug is generated from the
    /// name. Placement is checked before the insert and the new topic is
    /// appended at the end of its sibling group.
    pub async fn create(&self, request: CreateTopicRequest) -> Result<Topic, AppError> {
        let _guard = self.write_guard().await;

        let name = request.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }

        let slug = match &request.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
            _ => slugify(name),
        };
        if slug.is_empty() {
            return Err(AppError::Validation(format!(
                "Could not derive a slug from \"{}\"; provide one explicitly",
                name
            )));
        }

        let topics = self.store.fetch_all().await?;

        let level = match request.parent_id.as_deref() {
            Some(parent_id) => taxonomy::check_new_child(&topics, parent_id)?,
            None => 0,
        };

        let order_index = taxonomy::siblings(&topics, request.parent_id.as_deref())
            .last()
            .map(|t| t.order_index + 1)
            .unwrap_or(0);

        self.store
            .insert(NewTopic {
                name: name.to_string(),
                slug,
                description: request.description,
                status: request.status,
                parent_id: request.parent_id,
                level,
                order_index,
            })
            .await
    }

    /// Patch name, slug, description, or status. Parent changes go through
    /// [`TopicService::reparent`] so placement validation cannot be skipped.
    pub async fn update(&self, id: &str, request: UpdateTopicRequest) -> Result<Topic, AppError> {
        let _guard = self.write_guard().await;

        let name = match request.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::Validation("Name cannot be blank".to_string()));
                }
                Some(name)
            }
            None => None,
        };
        let slug = match request.slug {
            Some(slug) => {
                let slug = slug.trim().to_string();
                if slug.is_empty() {
                    return Err(AppError::Validation("Slug cannot be blank".to_string()));
                }
                Some(slug)
            }
            None => None,
        };

        self.store
            .update_by_id(
                id,
                TopicPatch {
                    name,
                    slug,
                    description: request.description,
                    status: request.status,
                    ..TopicPatch::default()
                },
            )
            .await
    }

    /// Physically delete a topic. Rejected while children exist; callers
    /// move or delete the children first.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.write_guard().await;

        let topics = self.store.fetch_all().await?;
        if !topics.iter().any(|t| t.id == id) {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }
        if topics.iter().any(|t| t.parent_id.as_deref() == Some(id)) {
            return Err(AppError::Constraint(format!(
                "Topic {} still has children; move or delete them first",
                id
            )));
        }

        self.store.delete_by_id(id).await
    }

    /// Move a topic (and its subtree) under a new parent, or to root.
    ///
    /// Placement is validated first; on success the topic is appended to its
    /// new sibling group and every descendant is re-leveled one write at a
    /// time, top down.
    pub async fn reparent(&self, id: &str, new_parent: Option<&str>) -> Result<Topic, AppError> {
        let _guard = self.write_guard().await;

        let topics = self.store.fetch_all().await?;
        if !topics.iter().any(|t| t.id == id) {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }

        let new_level = taxonomy::check_placement(&topics, id, new_parent)?;

        let order_index = taxonomy::siblings(&topics, new_parent)
            .into_iter()
            .filter(|t| t.id != id)
            .last()
            .map(|t| t.order_index + 1)
            .unwrap_or(0);

        let updated = self
            .store
            .update_by_id(
                id,
                TopicPatch {
                    parent_id: Some(new_parent.map(|s| s.to_string())),
                    level: Some(new_level),
                    order_index: Some(order_index),
                    ..TopicPatch::default()
                },
            )
            .await?;

        self.relevel_descendants(&topics, id, new_level).await?;

        Ok(updated)
    }

    /// Push a new level down the subtree rooted at `root_id`, enumerating
    /// descendants from the pre-write snapshot. Rows whose level is already
    /// right are skipped; the walk still descends through them.
    async fn relevel_descendants(
        &self,
        snapshot: &[Topic],
        root_id: &str,
        root_level: i64,
    ) -> Result<(), AppError> {
        let mut frontier = vec![(root_id.to_string(), root_level)];

        while let Some((parent_id, parent_level)) = frontier.pop() {
            for child in snapshot
                .iter()
                .filter(|t| t.parent_id.as_deref() == Some(parent_id.as_str()))
            {
                let child_level = parent_level + 1;
                if child.level != child_level {
                    self.store
                        .update_by_id(
                            &child.id,
                            TopicPatch {
                                level: Some(child_level),
                                ..TopicPatch::default()
                            },
                        )
                        .await?;
                }
                frontier.push((child.id.clone(), child_level));
            }
        }

        Ok(())
    }

    /// Every topic, in the store's canonical order.
    pub async fn list_all(&self) -> Result<Vec<Topic>, AppError> {
        self.store.fetch_all().await
    }

    /// Topics whose own stored status matches, regardless of ancestors.
    pub async fn list_by_status(&self, status: TopicStatus) -> Result<Vec<Topic>, AppError> {
        self.store.fetch_by_status(status).await
    }

    /// Topics whose entire ancestor chain, themselves included, is active.
    pub async fn list_visible(&self) -> Result<Vec<Topic>, AppError> {
        let topics = self.store.fetch_all().await?;
        Ok(taxonomy::filter_visible(&topics)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The ordered forest derived from the flat list. Rebuilt per call.
    pub async fn tree(&self) -> Result<Vec<TopicNode>, AppError> {
        let topics = self.store.fetch_all().await?;
        Ok(taxonomy::build_tree(&topics))
    }

    /// Fetch one topic by id.
    pub async fn get(&self, id: &str) -> Result<Topic, AppError> {
        let topics = self.store.fetch_all().await?;
        topics
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))
    }

    /// The sibling group under `parent_id` (None selects the roots), in
    /// canonical order.
    pub async fn siblings(&self, parent_id: Option<&str>) -> Result<Vec<Topic>, AppError> {
        let topics = self.store.fetch_all().await?;
        Ok(taxonomy::siblings(&topics, parent_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Swap a topic with the sibling above it. See [`TopicService::move_topic`].
    pub async fn move_up(&self, id: &str) -> Result<Vec<Topic>, AppError> {
        self.move_topic(id, MoveDirection::Up).await
    }

    /// Swap a topic with the sibling below it. See [`TopicService::move_topic`].
    pub async fn move_down(&self, id: &str) -> Result<Vec<Topic>, AppError> {
        self.move_topic(id, MoveDirection::Down).await
    }

    /// Swap a topic's `order_index` with its neighbor in the given direction
    /// and return the refreshed sibling group. Moving past the edge of the
    /// group is a no-op, not an error.
    ///
    /// The swap is two independent writes; a failure between them leaves the
    /// group half-swapped.
    pub async fn move_topic(
        &self,
        id: &str,
        direction: MoveDirection,
    ) -> Result<Vec<Topic>, AppError> {
        let _guard = self.write_guard().await;

        let topics = self.store.fetch_all().await?;
        let topic = topics
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))?;
        let parent_id = topic.parent_id.clone();

        let group = taxonomy::siblings(&topics, parent_id.as_deref());
        let Some(writes) = taxonomy::neighbor_swap(&group, id, direction) else {
            return Ok(group.into_iter().cloned().collect());
        };

        for write in &writes {
            self.store
                .update_by_id(
                    &write.id,
                    TopicPatch {
                        order_index: Some(write.order_index),
                        ..TopicPatch::default()
                    },
                )
                .await?;
        }

        let refreshed = self.store.fetch_all().await?;
        Ok(taxonomy::siblings(&refreshed, parent_id.as_deref())
            .into_iter()
            .cloned()
            .collect())
    }

    /// Reassign one sibling group to dense 0..n-1 indexes in the given order.
    ///
    /// `ordered_ids` must be a permutation of the group's current members.
    /// Also the recovery path for historical `order_index` collisions: the
    /// result is always collision-free. One write per row whose index
    /// actually changes.
    pub async fn reorder(
        &self,
        parent_id: Option<&str>,
        ordered_ids: &[String],
    ) -> Result<Vec<Topic>, AppError> {
        let _guard = self.write_guard().await;

        let topics = self.store.fetch_all().await?;
        let group = taxonomy::siblings(&topics, parent_id);
        let writes = taxonomy::reorder_writes(&group, ordered_ids).map_err(AppError::Validation)?;

        for write in &writes {
            let unchanged = group
                .iter()
                .any(|t| t.id == write.id && t.order_index == write.order_index);
            if unchanged {
                continue;
            }
            self.store
                .update_by_id(
                    &write.id,
                    TopicPatch {
                        order_index: Some(write.order_index),
                        ..TopicPatch::default()
                    },
                )
                .await?;
        }

        let refreshed = self.store.fetch_all().await?;
        Ok(taxonomy::siblings(&refreshed, parent_id)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Revision info plus the flat topic list: the one-call refresh the admin
    /// UI issues after every mutation.
    pub async fn snapshot(&self) -> Result<TaxonomySnapshot, AppError> {
        let revision = self.store.revision().await?;
        let topics = self.store.fetch_all().await?;
        Ok(TaxonomySnapshot {
            revision_id: revision.revision_id,
            generated_at: revision.generated_at,
            topics,
        })
    }

    /// Current revision metadata.
    pub async fn revision_info(&self) -> Result<RevisionInfo, AppError> {
        self.store.revision().await
    }

    /// Best-effort revision for response envelopes; 0 when the store is
    /// unreachable.
    pub async fn revision_id(&self) -> i64 {
        self.store
            .revision()
            .await
            .map(|r| r.revision_id)
            .unwrap_or(0)
    }
}
