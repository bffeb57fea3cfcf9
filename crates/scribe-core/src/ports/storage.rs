use thiserror::Error;

/// Storage trait - abstraction over local key-value backends (file, in-memory).
///
/// Keys and values are plain strings. The post store keeps its whole
/// collection under a single key and replaces the value on every mutation, so
/// backends only need atomicity at the granularity of one `set`.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure: {0}")]
    Io(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}
