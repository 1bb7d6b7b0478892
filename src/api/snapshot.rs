//! Snapshot API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::{RevisionInfo, TaxonomySnapshot};
use crate::AppState;

/// GET /api/snapshot - The full flat taxonomy plus revision metadata.
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<TaxonomySnapshot> {
    let snapshot = state
        .service
        .snapshot()
        .await
        .map_err(|e| crate::errors::AppErrorWithRevision {
            error: e,
            revision_id: 0,
        })?;

    let revision_id = snapshot.revision_id;
    success(snapshot, revision_id)
}

/// GET /api/revision - The current revision info.
pub async fn get_revision(State(state): State<AppState>) -> ApiResult<RevisionInfo> {
    let revision_info =
        state
            .service
            .revision_info()
            .await
            .map_err(|e| crate::errors::AppErrorWithRevision {
                error: e,
                revision_id: 0,
            })?;

    let revision_id = revision_info.revision_id;
    success(revision_info, revision_id)
}
