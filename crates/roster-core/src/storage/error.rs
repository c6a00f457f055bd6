//! Storage error handling
//!
//! Provides typed errors for storage operations with descriptive messages
//! and recovery suggestions.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stored bytes are not UTF-8 text
    #[error("Value under '{key}' is not valid UTF-8: {source}")]
    InvalidUtf8 {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Slot contents could not be decoded as a roster
    #[error("Slot '{key}' does not contain a valid roster: {details}")]
    CorruptSlot { key: String, details: String },

    /// Slot key cannot be mapped to storage
    #[error("Invalid slot key '{0}': keys must be non-empty and contain no path separators")]
    InvalidKey(String),

    /// Roster could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File not found (when expected to exist)
    #[error("File not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Create an error from an I/O error raised while writing `path`
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match classify(error, path) {
            Classified::Done(err) => err,
            Classified::Other(source, path) => StorageError::WriteError { path, source },
        }
    }

    /// Create an error from an I/O error raised while reading `path`
    pub fn from_read_io(error: io::Error, path: PathBuf) -> Self {
        match classify(error, path) {
            Classified::Done(err) => err,
            Classified::Other(source, path) => StorageError::ReadError { path, source },
        }
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("Free up disk space and try again."),
            StorageError::PermissionDenied { .. } => {
                Some("Check file and directory permissions. You may need to run with different permissions or change ownership.")
            }
            StorageError::CorruptSlot { .. } => {
                Some("Fix or remove the slot file by hand, or set on_corrupt = \"backup_and_reset\" to move it aside and start with an empty roster.")
            }
            StorageError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StorageError::InvalidKey(_) => Some("Choose a slot name without '/' or '\\'."),
            _ => None,
        }
    }
}

enum Classified {
    Done(StorageError),
    Other(io::Error, PathBuf),
}

fn classify(error: io::Error, path: PathBuf) -> Classified {
    match error.kind() {
        io::ErrorKind::PermissionDenied => Classified::Done(StorageError::PermissionDenied {
            path,
            source: error,
        }),
        io::ErrorKind::NotFound => Classified::Done(StorageError::NotFound { path }),
        // StorageFull is not stable on every platform, so match on the message too
        _ if is_disk_full_error(&error) => Classified::Done(StorageError::DiskFull {
            path,
            source: error,
        }),
        _ => Classified::Other(error, path),
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
