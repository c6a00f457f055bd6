//! File-backed key-value store
//!
//! Each key is stored as `<root>/<key>.json`. Writes are atomic (write to a
//! temp file, sync, then rename) so a slot is never left half-written.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::backend::{check_key, KeyValueStore};
use super::error::{StorageError, StorageResult};

/// Key-value store keeping one file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file holding `key`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        check_key(key)?;
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::from_read_io(e, path.clone()))?;
        debug!(key, bytes = bytes.len(), "Read slot from {:?}", path);
        let content = String::from_utf8(bytes).map_err(|source| StorageError::InvalidUtf8 {
            key: key.to_string(),
            source,
        })?;
        Ok(Some(content))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        check_key(key)?;
        let path = self.key_path(key);
        atomic_write(&path, value.as_bytes())?;
        debug!(key, bytes = value.len(), "Wrote slot to {:?}", path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        check_key(key)?;
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io(e, path))?;
        }
        Ok(())
    }

    fn copy(&mut self, from: &str, to: &str) -> StorageResult<()> {
        check_key(from)?;
        check_key(to)?;
        let source = self.key_path(from);
        if !source.exists() {
            return Ok(());
        }

        let bytes = fs::read(&source).map_err(|e| StorageError::from_read_io(e, source.clone()))?;
        atomic_write(&self.key_path(to), &bytes)?;
        debug!(from, to, bytes = bytes.len(), "Copied slot");
        Ok(())
    }

    fn location(&self, key: &str) -> Option<PathBuf> {
        Some(self.key_path(key))
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
