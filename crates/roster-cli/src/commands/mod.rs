//! Command handlers

use anyhow::{anyhow, bail, Result};

use roster_core::{FileKeyValueStore, RosterError, RosterService, SlotRecordStore};

pub mod config;
pub mod record;
pub mod status;

/// The roster as opened by the CLI
pub type FileRoster = RosterService<SlotRecordStore<FileKeyValueStore>>;

/// Turn a roster error into a user-facing error
pub fn explain(err: RosterError) -> anyhow::Error {
    match err {
        RosterError::Validation(e) => anyhow!("Validation failed: {}", e),
        RosterError::Storage(e) => match e.recovery_suggestion() {
            Some(hint) => anyhow!("{}\n{}", e, hint),
            None => anyhow!(e),
        },
        other => anyhow!(other),
    }
}

/// Convert a 1-based row number to a roster position
pub fn position(number: usize) -> Result<usize> {
    if number == 0 {
        bail!("Row numbers start at 1");
    }
    Ok(number - 1)
}
