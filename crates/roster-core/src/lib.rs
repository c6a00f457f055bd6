//! Roster Core Library
//!
//! This crate provides the core functionality for Roster, a small student
//! record manager: validated CRUD, name/id ordering and search over a list
//! of records persisted in a single key-value slot.
//!
//! # Architecture
//!
//! - **RosterService**: owns the in-memory list, the only writer
//! - **RecordStorage**: loads and saves the whole list
//! - **KeyValueStore**: where the serialized list lives (file or memory)
//!
//! # Quick Start
//!
//! ```text
//! let config = Config::load()?;
//! let mut roster = RosterService::open(SlotRecordStore::from_config(&config))?;
//!
//! roster.add(StudentRecord::new("12345678", "Zoe", "z@a.com"))?;
//! roster.sort_by_id()?;
//!
//! let hits = roster.search("zo");
//! ```
//!
//! # Modules
//!
//! - `roster`: The roster service (main entry point)
//! - `models`: Student record types
//! - `validation`: Id and email checks
//! - `sort`: Bubble and selection sort
//! - `storage`: Key-value backends and roster persistence
//! - `config`: Application configuration
//! - `error`: Roster operation errors

pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod sort;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::RosterError;
pub use models::{RosterList, StudentRecord};
pub use roster::{RosterService, SortKey};
pub use storage::{
    CorruptDataPolicy, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, RecordStorage,
    SlotRecordStore, StorageError,
};
pub use validation::{validate, ValidationError, ValidationErrorKind};
