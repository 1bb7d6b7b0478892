//! Snapshot model matching the frontend refresh contract.

use serde::{Deserialize, Serialize};

use super::Topic;

/// The flat taxonomy plus revision metadata, fetched by the UI after every
/// mutation to rebuild its local tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomySnapshot {
    pub revision_id: i64,
    pub generated_at: String,
    pub topics: Vec<Topic>,
}

/// Revision information for change detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionInfo {
    pub revision_id: i64,
    pub generated_at: String,
}
