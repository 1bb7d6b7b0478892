//! Data models for the topic taxonomy backend.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless
//! interoperability.

mod snapshot;
mod topic;

pub use snapshot::*;
pub use topic::*;
