//! Database repository for topic CRUD operations.
//!
//! Uses prepared statements; every successful write bumps the meta revision.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{RevisionInfo, Topic, TopicStatus};
use crate::store::{NewTopic, TopicPatch, TopicStore};

/// SQLite-backed implementation of the record store boundary.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Increment the revision ID and return the new value.
    async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    /// Get a topic by ID.
    async fn get_topic(&self, id: &str) -> Result<Option<Topic>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, slug, description, status, parent_id, level, order_index, created_at
               FROM topics WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(topic_from_row))
    }
}

#[async_trait]
impl TopicStore for Repository {
    async fn fetch_all(&self) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, slug, description, status, parent_id, level, order_index, created_at
               FROM topics ORDER BY parent_id, order_index, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    async fn fetch_by_status(&self, status: TopicStatus) -> Result<Vec<Topic>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, slug, description, status, parent_id, level, order_index, created_at
               FROM topics WHERE status = ? ORDER BY parent_id, order_index, id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(topic_from_row).collect())
    }

    async fn insert(&self, new: NewTopic) -> Result<Topic, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO topics (id, name, slug, description, status, parent_id, level, order_index, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.description)
        .bind(new.status.as_str())
        .bind(&new.parent_id)
        .bind(new.level)
        .bind(new.order_index)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Topic {
            id,
            name: new.name,
            slug: new.slug,
            description: new.description,
            status: new.status,
            parent_id: new.parent_id,
            level: new.level,
            order_index: new.order_index,
            created_at: now,
        })
    }

    async fn update_by_id(&self, id: &str, patch: TopicPatch) -> Result<Topic, AppError> {
        let existing = self
            .get_topic(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Topic {} not found", id)))?;

        let name = patch.name.unwrap_or(existing.name);
        let slug = patch.slug.unwrap_or(existing.slug);
        let description = patch.description.or(existing.description);
        let status = patch.status.unwrap_or(existing.status);
        let parent_id = patch.parent_id.unwrap_or(existing.parent_id);
        let level = patch.level.unwrap_or(existing.level);
        let order_index = patch.order_index.unwrap_or(existing.order_index);

        let result = sqlx::query(
            "UPDATE topics SET name = ?, slug = ?, description = ?, status = ?, parent_id = ?, level = ?, order_index = ?
             WHERE id = ?",
        )
        .bind(&name)
        .bind(&slug)
        .bind(&description)
        .bind(status.as_str())
        .bind(&parent_id)
        .bind(level)
        .bind(order_index)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }

        self.increment_revision().await?;

        Ok(Topic {
            id: id.to_string(),
            name,
            slug,
            description,
            status,
            parent_id,
            level,
            order_index,
            created_at: existing.created_at,
        })
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Topic {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    async fn revision(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }
}

// Helper function for row conversion

fn topic_from_row(row: &sqlx::sqlite::SqliteRow) -> Topic {
    let status_str: String = row.get("status");
    Topic {
        id: row.get("id"),
        name: row.get("name"),
        slug: row.get("slug"),
        description: row.get("description"),
        // Unknown status values in a row degrade to hidden, never to visible.
        status: TopicStatus::from_str(&status_str).unwrap_or(TopicStatus::Hidden),
        parent_id: row.get("parent_id"),
        level: row.get("level"),
        order_index: row.get("order_index"),
        created_at: row.get("created_at"),
    }
}
