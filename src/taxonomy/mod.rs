//! The topic taxonomy core: pure functions over flat topic rows.
//!
//! The record store keeps topics as a flat list with `parent_id` pointers;
//! every derived structure (tree, visibility, sibling order) is rebuilt on
//! demand from that list and never persisted. Nothing in this module touches
//! the store; the service façade owns persistence.

mod order;
mod placement;
mod tree;
mod visibility;

pub use order::*;
pub use placement::*;
pub use tree::*;
pub use visibility::*;

/// Deepest legal level, 0-indexed: the taxonomy holds at most three levels.
pub const MAX_LEVEL: i64 = 2;
