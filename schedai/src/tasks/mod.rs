//! Task and category reconciliation for the `SchedAI` client.
//!
//! [`store::TaskStore`] keeps the canonical in-memory task and category
//! lists consistent across loads and mutations; [`categories`] holds the
//! pure merge functions it builds on.

pub mod categories;
pub mod store;

pub use categories::{add_category, merge_category_names};
pub use store::{Snapshot, TaskStore};

use thiserror::Error;

use crate::transport::TransportError;
use schedai_proto::normalize::ShapeError;

/// Errors surfaced by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend request failed; the store kept its last-known-good
    /// state.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered, but the record could not become a canonical
    /// task.
    #[error("backend returned an unusable record: {0}")]
    Shape(#[from] ShapeError),
}
