//! Roster service
//!
//! `RosterService` owns the in-memory roster and is the only thing that
//! mutates it. Every mutation ends with a full save through the
//! [`RecordStorage`] it was opened with.
//!
//! ## Usage
//!
//! ```ignore
//! let mut roster = RosterService::open(SlotRecordStore::from_config(&config))?;
//!
//! roster.add(StudentRecord::new("12345678", "Zoe", "z@a.com"))?;
//! roster.sort_by_name()?;
//!
//! for record in roster.search("zo") {
//!     println!("{}", record.name);
//! }
//! ```
//!
//! Positions are zero-based indexes into [`RosterService::records`].

use std::str::FromStr;

use tracing::info;

use crate::error::{Result, RosterError};
use crate::models::{RosterList, StudentRecord};
use crate::sort::{bubble_sort_by, selection_sort_by};
use crate::storage::RecordStorage;
use crate::validation::{self, ValidationError};

/// Field a roster can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Case-insensitive name order (bubble sort, stable)
    Name,
    /// Lexicographic id order (selection sort, not stable)
    Id,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "nama" => Ok(SortKey::Name),
            "id" | "nim" => Ok(SortKey::Id),
            other => Err(format!("Unknown sort key '{}'. Use 'name' or 'id'.", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Id => write!(f, "id"),
        }
    }
}

/// The roster controller
pub struct RosterService<S: RecordStorage> {
    records: RosterList,
    storage: S,
}

impl<S: RecordStorage> RosterService<S> {
    /// Open the roster, loading it from `storage`
    pub fn open(mut storage: S) -> Result<Self> {
        let records = storage.load()?;
        info!(count = records.len(), "Roster opened");
        Ok(Self { records, storage })
    }

    /// Check an id/email pair without touching the roster
    pub fn validate(id: &str, email: &str) -> std::result::Result<(), ValidationError> {
        validation::validate(id, email)
    }

    /// All records in their current order
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`
    pub fn get(&self, index: usize) -> Result<&StudentRecord> {
        self.records.get(index).ok_or(RosterError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    /// The storage the roster persists to
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Validate and append a record
    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        Self::validate(&record.id, &record.email)?;
        info!(id = %record.id, "Adding record");
        self.records.push(record);
        self.persist()
    }

    /// Validate and replace the record at `index`
    pub fn update(&mut self, index: usize, record: StudentRecord) -> Result<()> {
        Self::validate(&record.id, &record.email)?;
        self.check_index(index)?;
        info!(index, id = %record.id, "Updating record");
        self.records[index] = record;
        self.persist()
    }

    /// Remove and return the record at `index`, shifting later records down
    pub fn delete(&mut self, index: usize) -> Result<StudentRecord> {
        self.check_index(index)?;
        let removed = self.records.remove(index);
        info!(index, id = %removed.id, "Deleted record");
        self.persist()?;
        Ok(removed)
    }

    /// Add when `edit_index` is `None`, otherwise update that position
    pub fn submit(&mut self, record: StudentRecord, edit_index: Option<usize>) -> Result<()> {
        match edit_index {
            None => self.add(record),
            Some(index) => self.update(index, record),
        }
    }

    /// Order by lowercased name
    pub fn sort_by_name(&mut self) -> Result<()> {
        bubble_sort_by(&mut self.records, |a, b| a.name_key() < b.name_key());
        info!(count = self.records.len(), "Sorted roster by name");
        self.persist()
    }

    /// Order by id, compared as strings ("9" sorts after "10")
    pub fn sort_by_id(&mut self) -> Result<()> {
        selection_sort_by(&mut self.records, |a, b| a.id < b.id);
        info!(count = self.records.len(), "Sorted roster by id");
        self.persist()
    }

    pub fn sort(&mut self, key: SortKey) -> Result<()> {
        match key {
            SortKey::Name => self.sort_by_name(),
            SortKey::Id => self.sort_by_id(),
        }
    }

    /// Records whose name contains `query` ignoring case, or whose id
    /// contains `query` as typed. Keeps roster order.
    pub fn search(&self, query: &str) -> Vec<StudentRecord> {
        self.search_indexed(query)
            .into_iter()
            .map(|(_, record)| record.clone())
            .collect()
    }

    /// Like [`search`](Self::search), paired with each hit's position
    pub fn search_indexed(&self, query: &str) -> Vec<(usize, &StudentRecord)> {
        let q = query.to_lowercase();
        let mut results = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            if record.name_key().contains(&q) || record.id.contains(query) {
                results.push((index, record));
            }
        }
        results
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(RosterError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.storage.save(&self.records)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{
        KeyValueStore, MemoryKeyValueStore, SlotRecordStore, StorageError, DEFAULT_SLOT,
    };
    use crate::validation::ValidationErrorKind;

    type MemRoster = RosterService<SlotRecordStore<MemoryKeyValueStore>>;

    fn empty() -> MemRoster {
        RosterService::open(SlotRecordStore::in_memory()).unwrap()
    }

    /// Zoe (12345678) then Amy (87654321)
    fn zoe_amy() -> MemRoster {
        let mut roster = empty();
        roster
            .add(StudentRecord::new("12345678", "Zoe", "z@a.com"))
            .unwrap();
        roster
            .add(StudentRecord::new("87654321", "Amy", "a@b.com"))
            .unwrap();
        roster
    }

    fn with_records(records: &[(&str, &str)]) -> MemRoster {
        let mut roster = empty();
        for (id, name) in records {
            roster
                .add(StudentRecord::new(*id, *name, "x@y.com"))
                .unwrap();
        }
        roster
    }

    fn names(roster: &MemRoster) -> Vec<&str> {
        roster.records().iter().map(|r| r.name.as_str()).collect()
    }

    fn ids(roster: &MemRoster) -> Vec<&str> {
        roster.records().iter().map(|r| r.id.as_str()).collect()
    }

    fn persisted(roster: &MemRoster) -> RosterList {
        let raw = roster
            .storage()
            .backend()
            .get(DEFAULT_SLOT)
            .unwrap()
            .unwrap_or_else(|| "[]".to_string());
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_open_empty() {
        let roster = empty();
        assert!(roster.is_empty());
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn test_open_loads_existing() {
        let raw = r#"[{"id":"12345678","name":"Zoe","email":"z@a.com"}]"#;
        let store = SlotRecordStore::new(
            MemoryKeyValueStore::new().with_entry(DEFAULT_SLOT, raw),
            DEFAULT_SLOT,
        );
        let roster = RosterService::open(store).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(0).unwrap().name, "Zoe");
    }

    #[test]
    fn test_open_corrupt_fails() {
        let store = SlotRecordStore::new(
            MemoryKeyValueStore::new().with_entry(DEFAULT_SLOT, "nope"),
            DEFAULT_SLOT,
        );
        let err = RosterService::open(store).err().unwrap();
        assert!(matches!(
            err,
            RosterError::Storage(StorageError::CorruptSlot { .. })
        ));
    }

    #[test]
    fn test_add_appends_and_persists() {
        let roster = zoe_amy();
        assert_eq!(names(&roster), vec!["Zoe", "Amy"]);
        assert_eq!(persisted(&roster), roster.records());
    }

    #[test]
    fn test_add_rejects_invalid_id() {
        let mut roster = empty();
        let err = roster
            .add(StudentRecord::new("123", "Zoe", "a@b.com"))
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::InvalidId));
        assert!(roster.is_empty());
        // Nothing was written
        assert!(roster.storage().backend().get(DEFAULT_SLOT).unwrap().is_none());
    }

    #[test]
    fn test_add_rejects_invalid_email() {
        let mut roster = empty();
        let err = roster
            .add(StudentRecord::new("12345678", "Zoe", "zoe at example"))
            .unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationErrorKind::InvalidEmail)
        );
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_allows_duplicate_ids() {
        let mut roster = empty();
        roster
            .add(StudentRecord::new("12345678", "Zoe", "z@a.com"))
            .unwrap();
        roster
            .add(StudentRecord::new("12345678", "Zed", "z@b.com"))
            .unwrap();
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_update_replaces() {
        let mut roster = zoe_amy();
        roster
            .update(1, StudentRecord::new("11112222", "Amelia", "am@b.com"))
            .unwrap();
        assert_eq!(names(&roster), vec!["Zoe", "Amelia"]);
        assert_eq!(persisted(&roster)[1].id, "11112222");
    }

    #[test]
    fn test_update_out_of_range() {
        let mut roster = zoe_amy();
        let err = roster
            .update(2, StudentRecord::new("11112222", "Amelia", "am@b.com"))
            .unwrap_err();
        assert!(matches!(
            err,
            RosterError::IndexOutOfRange { index: 2, len: 2 }
        ));
        assert_eq!(names(&roster), vec!["Zoe", "Amy"]);
    }

    #[test]
    fn test_update_validates_first() {
        let mut roster = zoe_amy();
        let err = roster
            .update(9, StudentRecord::new("bad", "X", "x@y.com"))
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationErrorKind::InvalidId));
    }

    #[test]
    fn test_delete_shifts() {
        let mut roster = with_records(&[
            ("11111111", "A"),
            ("22222222", "B"),
            ("33333333", "C"),
        ]);
        let removed = roster.delete(1).unwrap();
        assert_eq!(removed.name, "B");
        assert_eq!(names(&roster), vec!["A", "C"]);
        assert_eq!(persisted(&roster).len(), 2);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut roster = empty();
        assert!(matches!(
            roster.delete(0),
            Err(RosterError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_submit_dispatch() {
        let mut roster = empty();
        roster
            .submit(StudentRecord::new("12345678", "Zoe", "z@a.com"), None)
            .unwrap();
        roster
            .submit(StudentRecord::new("12345678", "Zoey", "z@a.com"), Some(0))
            .unwrap();
        assert_eq!(names(&roster), vec!["Zoey"]);
    }

    #[test]
    fn test_sort_by_name_scenario() {
        let mut roster = zoe_amy();
        roster.sort_by_name().unwrap();
        assert_eq!(names(&roster), vec!["Amy", "Zoe"]);
        assert_eq!(persisted(&roster), roster.records());
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let mut roster = with_records(&[
            ("11111111", "bob"),
            ("22222222", "Alice"),
            ("33333333", "carol"),
            ("44444444", "BOB"),
        ]);
        roster.sort_by_name().unwrap();
        // Equal keys keep their prior order
        assert_eq!(names(&roster), vec!["Alice", "bob", "BOB", "carol"]);

        for pair in roster.records().windows(2) {
            assert!(pair[0].name_key() <= pair[1].name_key());
        }
    }

    #[test]
    fn test_sort_by_name_idempotent() {
        let mut roster = with_records(&[
            ("11111111", "delta"),
            ("22222222", "Alpha"),
            ("33333333", "alpha"),
            ("44444444", "Charlie"),
        ]);
        roster.sort_by_name().unwrap();
        let once: Vec<StudentRecord> = roster.records().to_vec();
        roster.sort_by_name().unwrap();
        assert_eq!(roster.records(), once.as_slice());
    }

    #[test]
    fn test_sort_by_id_scenario() {
        let mut roster = zoe_amy();
        roster.sort_by_name().unwrap();
        roster.sort_by_id().unwrap();
        assert_eq!(ids(&roster), vec!["12345678", "87654321"]);
    }

    #[test]
    fn test_sort_by_id_is_lexicographic() {
        let mut roster = with_records(&[
            ("900000000", "Nine"),
            ("1000000000", "Ten"),
            ("12345678", "Short"),
        ]);
        roster.sort_by_id().unwrap();
        assert_eq!(ids(&roster), vec!["1000000000", "12345678", "900000000"]);

        for pair in roster.records().windows(2) {
            assert!(pair[0].id <= pair[1].id);
        }
    }

    #[test]
    fn test_sort_dispatch() {
        let mut roster = zoe_amy();
        roster.sort("name".parse().unwrap()).unwrap();
        assert_eq!(names(&roster), vec!["Amy", "Zoe"]);
        roster.sort(SortKey::Id).unwrap();
        assert_eq!(names(&roster), vec!["Zoe", "Amy"]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("Name".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!("nim".parse::<SortKey>(), Ok(SortKey::Id));
        assert!("email".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Id.to_string(), "id");
    }

    #[test]
    fn test_sort_empty_roster() {
        let mut roster = empty();
        roster.sort_by_name().unwrap();
        roster.sort_by_id().unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_search_scenarios() {
        let roster = zoe_amy();

        let hits = roster.search("87");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Amy");

        let hits = roster.search("zo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Zoe");
    }

    #[test]
    fn test_search_case_insensitive_name() {
        let roster = zoe_amy();
        assert_eq!(roster.search("AMY").len(), 1);
        assert_eq!(roster.search("aM").len(), 1);
    }

    #[test]
    fn test_search_keeps_order_and_does_not_mutate() {
        let roster = with_records(&[
            ("11111111", "Anna"),
            ("22222222", "Bob"),
            ("33333333", "Hannah"),
        ]);
        let hits: Vec<String> = roster.search("ann").into_iter().map(|r| r.name).collect();
        assert_eq!(hits, vec!["Anna", "Hannah"]);
        assert_eq!(names(&roster), vec!["Anna", "Bob", "Hannah"]);
    }

    #[test]
    fn test_search_empty_query_matches_all() {
        let roster = zoe_amy();
        assert_eq!(roster.search("").len(), 2);
    }

    #[test]
    fn test_search_no_match() {
        let roster = zoe_amy();
        assert!(roster.search("xyz").is_empty());
    }

    #[test]
    fn test_search_id_is_case_sensitive() {
        // Loaded data is not re-validated, so ids may hold letters
        let raw = r#"[{"id":"AB123456","name":"Kim","email":"k@x.com"}]"#;
        let store = SlotRecordStore::new(
            MemoryKeyValueStore::new().with_entry(DEFAULT_SLOT, raw),
            DEFAULT_SLOT,
        );
        let roster = RosterService::open(store).unwrap();
        assert_eq!(roster.search("AB12").len(), 1);
        assert_eq!(roster.search("123").len(), 1);
        // Name matches ignore case, id matches do not
        assert!(roster.search("ab12").is_empty());
    }

    #[test]
    fn test_search_indexed_positions() {
        let roster = with_records(&[
            ("11111111", "Anna"),
            ("22222222", "Bob"),
            ("33333333", "Hannah"),
        ]);
        let positions: Vec<usize> = roster
            .search_indexed("ann")
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn test_reopen_sees_changes() {
        let mut roster = zoe_amy();
        roster.sort_by_name().unwrap();
        roster.delete(0).unwrap();

        let backend = roster.storage().backend().clone();
        let reopened =
            RosterService::open(SlotRecordStore::new(backend, DEFAULT_SLOT)).unwrap();
        assert_eq!(names(&reopened), vec!["Zoe"]);
    }
}
