//! Roster persistence in a single key-value slot
//!
//! The whole roster is stored as one JSON array under one key. Every save
//! rewrites the slot in full; there is no append or partial update, and no
//! check for changes made to the slot by anyone else.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::backend::KeyValueStore;
use super::error::{StorageError, StorageResult};
use super::file::FileKeyValueStore;
use super::memory::MemoryKeyValueStore;
use crate::config::Config;
use crate::models::{RosterList, StudentRecord};

/// Default slot key
pub const DEFAULT_SLOT: &str = "NEXUS_PREMIUM_DB";

/// Suffix of the key that receives a corrupt blob before it is reset
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Load and save a whole roster
pub trait RecordStorage {
    /// Read the persisted roster. An absent slot yields an empty roster.
    fn load(&mut self) -> StorageResult<RosterList>;

    /// Replace the persisted roster with `records`
    fn save(&mut self, records: &[StudentRecord]) -> StorageResult<()>;
}

/// What to do when the slot holds something that is not a roster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptDataPolicy {
    /// Return [`StorageError::CorruptSlot`] and leave the slot untouched
    #[default]
    Fail,
    /// Copy the blob to `<slot>.corrupt` and start with an empty roster
    BackupAndReset,
}

impl std::str::FromStr for CorruptDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(CorruptDataPolicy::Fail),
            "backup_and_reset" | "backup-and-reset" | "reset" => {
                Ok(CorruptDataPolicy::BackupAndReset)
            }
            other => Err(format!(
                "Unknown corrupt data policy '{}'. Use 'fail' or 'backup_and_reset'.",
                other
            )),
        }
    }
}

impl std::fmt::Display for CorruptDataPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorruptDataPolicy::Fail => write!(f, "fail"),
            CorruptDataPolicy::BackupAndReset => write!(f, "backup_and_reset"),
        }
    }
}

/// A roster stored under one key of a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SlotRecordStore<K: KeyValueStore> {
    backend: K,
    slot: String,
    on_corrupt: CorruptDataPolicy,
}

impl<K: KeyValueStore> SlotRecordStore<K> {
    /// Bind `backend` to `slot` with the default corrupt data policy
    pub fn new(backend: K, slot: impl Into<String>) -> Self {
        Self {
            backend,
            slot: slot.into(),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }

    /// Set the corrupt data policy
    pub fn with_policy(mut self, on_corrupt: CorruptDataPolicy) -> Self {
        self.on_corrupt = on_corrupt;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn policy(&self) -> CorruptDataPolicy {
        self.on_corrupt
    }

    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Key that receives a corrupt blob under [`CorruptDataPolicy::BackupAndReset`]
    pub fn backup_slot(&self) -> String {
        format!("{}{}", self.slot, CORRUPT_SUFFIX)
    }

    /// Where the slot lives on disk, if anywhere
    pub fn location(&self) -> Option<std::path::PathBuf> {
        self.backend.location(&self.slot)
    }

    fn recover_corrupt(&mut self, details: String) -> StorageResult<RosterList> {
        match self.on_corrupt {
            CorruptDataPolicy::Fail => Err(StorageError::CorruptSlot {
                key: self.slot.clone(),
                details,
            }),
            CorruptDataPolicy::BackupAndReset => {
                let backup = self.backup_slot();
                self.backend.copy(&self.slot, &backup)?;
                warn!(
                    slot = %self.slot,
                    backup = %backup,
                    "Slot is corrupt ({}); moved aside, starting with an empty roster",
                    details
                );
                Ok(RosterList::new())
            }
        }
    }
}

impl SlotRecordStore<FileKeyValueStore> {
    /// File-backed store under the configured data directory and slot
    pub fn from_config(config: &Config) -> Self {
        SlotRecordStore::new(FileKeyValueStore::new(&config.data_dir), &config.slot)
            .with_policy(config.on_corrupt)
    }
}

impl SlotRecordStore<MemoryKeyValueStore> {
    /// Empty in-memory store using the default slot
    pub fn in_memory() -> Self {
        SlotRecordStore::new(MemoryKeyValueStore::new(), DEFAULT_SLOT)
    }
}

impl<K: KeyValueStore> RecordStorage for SlotRecordStore<K> {
    fn load(&mut self) -> StorageResult<RosterList> {
        let raw = match self.backend.get(&self.slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(slot = %self.slot, "Slot is empty, starting with an empty roster");
                return Ok(RosterList::new());
            }
            Err(e @ StorageError::InvalidUtf8 { .. }) => {
                return self.recover_corrupt(e.to_string());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str::<RosterList>(&raw) {
            Ok(records) => {
                debug!(slot = %self.slot, count = records.len(), "Loaded roster");
                Ok(records)
            }
            Err(e) => self.recover_corrupt(e.to_string()),
        }
    }

    fn save(&mut self, records: &[StudentRecord]) -> StorageResult<()> {
        let encoded = serde_json::to_string(records)?;
        self.backend.set(&self.slot, &encoded)?;
        debug!(slot = %self.slot, count = records.len(), "Saved roster");
        Ok(())
    }
}
