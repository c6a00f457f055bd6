//! Key-value storage backends
//!
//! A backend maps string keys to string values, like a browser's local
//! storage. The roster lives in a single key of one backend.

use std::path::PathBuf;

use super::error::{StorageError, StorageResult};

/// A string-to-string key-value store
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if the key is absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Copy the value under `from` to `to` without decoding it
    ///
    /// Works even when the stored value cannot be read back as text.
    fn copy(&mut self, from: &str, to: &str) -> StorageResult<()> {
        match self.get(from)? {
            Some(value) => self.set(to, &value),
            None => Ok(()),
        }
    }

    /// Check whether `key` holds a value
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Where the value for `key` lives on disk, if anywhere
    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}

/// Reject keys that cannot be used as a single file name
pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
