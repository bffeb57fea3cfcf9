//! File-backed storage implementation - one file per key under a root
//! directory.

use std::fs;
use std::io;
use std::path::PathBuf;

use scribe_core::ports::{Storage, StorageError};

/// File-backed storage: each key is persisted as `<root>/<key>.json`.
///
/// `set` writes a temporary file and renames it over the target, so a reader
/// observes either the old or the new whole value, never a partial write.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open the storage root directory, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(io_error)?;
        tracing::debug!(root = %root.display(), "File storage opened");
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        // Keys name files directly; anything resembling a path is rejected.
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(StorageError::Operation(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn io_error(err: io::Error) -> StorageError {
    StorageError::Io(err.to_string())
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_error)?;
        fs::rename(&tmp, &path).map_err(io_error)?;
        tracing::debug!(key, bytes = value.len(), "Value persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(err)),
        }
    }
}
