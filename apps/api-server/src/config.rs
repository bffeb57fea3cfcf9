//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub storage: Option<StorageConfig>,
}

/// Where the post collection is persisted.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `STORAGE_DIR` selects the file-backed storage root; when unset the
    /// server runs on the in-memory fallback and posts do not survive a
    /// restart.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            storage: env::var("STORAGE_DIR").ok().map(|dir| StorageConfig {
                data_dir: PathBuf::from(dir),
            }),
        }
    }
}
