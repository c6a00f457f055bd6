//! Input validation
//!
//! Student numbers and email addresses are checked against fixed patterns
//! before any record reaches the roster. The id is checked first and the
//! first failure is the only one reported.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8,15}$").expect("id pattern is valid"));

// U+FEFF counts as whitespace for email purposes, alongside the Unicode `\s` class
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern is valid")
});

/// Which check rejected the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The id is not 8-15 ASCII digits
    InvalidId,
    /// The email is not shaped like `local@domain.tld`
    InvalidEmail,
}

/// A rejected id or email
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Student ID must be 8-15 digits, got '{0}'")]
    InvalidId(String),

    #[error("Email address '{0}' is not valid")]
    InvalidEmail(String),
}

impl ValidationError {
    /// The kind of failure, without the offending value
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::InvalidId(_) => ValidationErrorKind::InvalidId,
            ValidationError::InvalidEmail(_) => ValidationErrorKind::InvalidEmail,
        }
    }
}

/// Check an id/email pair
pub fn validate(id: &str, email: &str) -> Result<(), ValidationError> {
    if !is_valid_id(id) {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// True if `id` is 8-15 ASCII digits
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

/// True if `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
