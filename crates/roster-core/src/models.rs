//! Data models for Roster
//!
//! Defines the student record and the roster list that holds them.
//! Field names are part of the persisted format and must not change.
//! Rosters saved with the older `nim`/`nama` field names still load.

use serde::{Deserialize, Serialize};

/// The ordered list of records held by the roster
pub type RosterList = Vec<StudentRecord>;

/// A single student entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    /// Student number, 8-15 ASCII digits. Not guaranteed unique.
    #[serde(alias = "nim")]
    pub id: String,
    /// Display name (free text)
    #[serde(alias = "nama")]
    pub name: String,
    /// Contact email
    pub email: String,
}

impl StudentRecord {
    /// Create a new record
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Lowercased name, the key used for name ordering and name search
    pub fn name_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// First character of the name, used as a row avatar
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next()
    }
}
