//! Roster operation errors

use thiserror::Error;

use crate::storage::StorageError;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors returned by roster operations
#[derive(Error, Debug)]
pub enum RosterError {
    /// Input was rejected before touching the roster
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Position does not refer to a record
    #[error("No record at position {index} (roster has {len} record(s))")]
    IndexOutOfRange { index: usize, len: usize },

    /// Loading or saving the roster failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RosterError {
    /// The validation failure kind, if this is a validation error
    pub fn validation_kind(&self) -> Option<ValidationErrorKind> {
        match self {
            RosterError::Validation(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
