//! Storage layer
//!
//! Handles roster persistence in a key-value store.
//!
//! ## Architecture
//!
//! - **KeyValueStore**: string keys to string values, either on disk
//!   ([`FileKeyValueStore`]) or in memory ([`MemoryKeyValueStore`])
//! - **RecordStorage**: loads and saves a whole roster; [`SlotRecordStore`]
//!   keeps it as a JSON array under a single key (the "slot")
//!
//! The roster service only sees [`RecordStorage`], so it can be tested
//! against an in-memory backend.

pub mod backend;
pub mod error;
pub mod file;
pub mod memory;
pub mod slot;

pub use backend::KeyValueStore;
pub use error::{StorageError, StorageResult};
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use slot::{CorruptDataPolicy, RecordStorage, SlotRecordStore, DEFAULT_SLOT};
