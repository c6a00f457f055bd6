use std::collections::HashMap;

use super::backend::KeyValueStore;
use super::error::StorageResult;

/// In-memory key-value store for testing and embedding.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a key, e.g. with a hand-written or corrupt blob
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut store = MemoryKeyValueStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        assert!(store.contains("k").unwrap());

        store.remove("k").unwrap();
        assert!(!store.contains("k").unwrap());
    }

    #[test]
    fn test_with_entry() {
        let store = MemoryKeyValueStore::new().with_entry("k", "seeded");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("seeded"));
        assert!(store.location("k").is_none());
    }
}
