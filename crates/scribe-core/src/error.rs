//! Domain-level error types.

use thiserror::Error;

use crate::ports::StorageError;

/// Failures surfaced by the post store.
///
/// A missing post is never an error: lookups return `None` and deletes return
/// `false` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Storage(#[from] StorageError),

    #[error("corrupt post collection: {0}")]
    Corrupt(#[from] serde_json::Error),
}
