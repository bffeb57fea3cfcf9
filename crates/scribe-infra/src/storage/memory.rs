//! In-memory storage implementation - used as fallback when no data directory
//! is configured.

use std::collections::HashMap;
use std::sync::RwLock;

use scribe_core::ports::{Storage, StorageError};

/// In-memory storage using a simple HashMap behind an RwLock.
///
/// This is the fallback implementation when no data directory is available.
/// Note: Data is lost on process restart.
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Operation("storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Operation("storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Operation("storage lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let storage = InMemoryStorage::new();
        storage.set("key1", "value1").unwrap();
        assert_eq!(storage.get("key1").unwrap(), Some("value1".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let storage = InMemoryStorage::new();
        storage.set("key1", "old").unwrap();
        storage.set("key1", "new").unwrap();
        assert_eq!(storage.get("key1").unwrap(), Some("new".to_string()));
    }

    #[test]
    fn test_remove() {
        let storage = InMemoryStorage::new();
        storage.set("key1", "value1").unwrap();
        storage.remove("key1").unwrap();
        assert_eq!(storage.get("key1").unwrap(), None);

        // Removing again is a no-op.
        storage.remove("key1").unwrap();
    }
}
