//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::PostStore;
use scribe_core::ports::{Storage, SystemClock};
use scribe_infra::{FileStorage, InMemoryStorage};

use crate::config::StorageConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostStore>,
}

impl AppState {
    /// Build the application state with the appropriate storage backend.
    pub fn new(storage_config: Option<&StorageConfig>) -> Self {
        let storage: Arc<dyn Storage> = match storage_config {
            Some(config) => match FileStorage::open(&config.data_dir) {
                Ok(file) => {
                    tracing::info!(
                        data_dir = %config.data_dir.display(),
                        "Using file-backed storage"
                    );
                    Arc::new(file)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to open storage dir {}: {}. Using in-memory fallback.",
                        config.data_dir.display(),
                        e
                    );
                    Arc::new(InMemoryStorage::new())
                }
            },
            None => {
                tracing::warn!(
                    "STORAGE_DIR not set. Posts will not survive a restart (in-memory mode)."
                );
                Arc::new(InMemoryStorage::new())
            }
        };

        Self::with_storage(storage)
    }

    /// Build state over an explicit storage backend (used by tests).
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        let posts = Arc::new(PostStore::new(storage, Arc::new(SystemClock)));

        tracing::info!("Application state initialized");

        Self { posts }
    }
}
