//! Topic API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    CreateTopicRequest, MoveTopicRequest, ReorderTopicsRequest, ReparentTopicRequest, Topic,
    TopicNode, TopicStatus, UpdateTopicRequest,
};
use crate::AppState;

/// Query parameters for listing topics.
#[derive(Debug, Deserialize)]
pub struct ListTopicsQuery {
    /// Filter by stored status ("active" or "hidden"). Omitted lists all.
    #[serde(default)]
    pub status: Option<String>,
}

/// GET /api/topics - List all topics, optionally filtered by stored status.
pub async fn list_topics(
    State(state): State<AppState>,
    Query(params): Query<ListTopicsQuery>,
) -> ApiResult<Vec<Topic>> {
    let revision_id = state.service.revision_id().await;

    let result = match params.status.as_deref() {
        Some(raw) => match TopicStatus::from_str(raw) {
            Some(status) => state.service.list_by_status(status).await,
            None => {
                return error(
                    AppError::Validation(format!(
                        "Unknown status \"{}\"; expected \"active\" or \"hidden\"",
                        raw
                    )),
                    revision_id,
                )
            }
        },
        None => state.service.list_all().await,
    };

    match result {
        Ok(topics) => success(topics, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/topics/tree - The taxonomy as an ordered forest.
pub async fn get_topic_tree(State(state): State<AppState>) -> ApiResult<Vec<TopicNode>> {
    let revision_id = state.service.revision_id().await;

    match state.service.tree().await {
        Ok(forest) => success(forest, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/topics/visible - Topics whose whole ancestor chain is active.
pub async fn list_visible_topics(State(state): State<AppState>) -> ApiResult<Vec<Topic>> {
    let revision_id = state.service.revision_id().await;

    match state.service.list_visible().await {
        Ok(topics) => success(topics, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/topics/:id - Get a single topic.
pub async fn get_topic(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Topic> {
    let revision_id = state.service.revision_id().await;

    match state.service.get(&id).await {
        Ok(topic) => success(topic, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/topics - Create a new topic.
pub async fn create_topic(
    State(state): State<AppState>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<Topic> {
    let revision_id = state.service.revision_id().await;

    match state.service.create(request).await {
        Ok(topic) => {
            let new_revision = state.service.revision_id().await;
            success(topic, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/topics/:id - Update a topic's own fields.
pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTopicRequest>,
) -> ApiResult<Topic> {
    let revision_id = state.service.revision_id().await;

    match state.service.update(&id, request).await {
        Ok(topic) => {
            let new_revision = state.service.revision_id().await;
            success(topic, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// DELETE /api/topics/:id - Delete a childless topic.
pub async fn delete_topic(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.service.revision_id().await;

    match state.service.delete(&id).await {
        Ok(()) => {
            let new_revision = state.service.revision_id().await;
            success((), new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/topics/:id/parent - Move a topic (with its subtree) to a new
/// parent, or to root.
pub async fn reparent_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReparentTopicRequest>,
) -> ApiResult<Topic> {
    let revision_id = state.service.revision_id().await;

    match state
        .service
        .reparent(&id, request.parent_id.as_deref())
        .await
    {
        Ok(topic) => {
            let new_revision = state.service.revision_id().await;
            success(topic, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/topics/:id/move - Swap a topic with a neighboring sibling.
/// Returns the refreshed sibling group.
pub async fn move_topic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MoveTopicRequest>,
) -> ApiResult<Vec<Topic>> {
    let revision_id = state.service.revision_id().await;

    match state.service.move_topic(&id, request.direction).await {
        Ok(group) => {
            let new_revision = state.service.revision_id().await;
            success(group, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/topics/reorder - Reassign one sibling group to dense indexes in
/// the given order. Returns the refreshed group.
pub async fn reorder_topics(
    State(state): State<AppState>,
    Json(request): Json<ReorderTopicsRequest>,
) -> ApiResult<Vec<Topic>> {
    let revision_id = state.service.revision_id().await;

    match state
        .service
        .reorder(request.parent_id.as_deref(), &request.ordered_ids)
        .await
    {
        Ok(group) => {
            let new_revision = state.service.revision_id().await;
            success(group, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}
