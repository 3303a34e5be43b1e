//! Error types for the data-loader crate.
//!
//! Every failure while reading or parsing rating records maps onto one
//! variant of [`DataLoadError`]. Parse-level variants are recoverable (the
//! offending record is skipped), while `FileNotFound` aborts the load.

use thiserror::Error;

/// Errors that can occur while loading rating records
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Input source could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record or one of its `movie$score` tokens is malformed
    #[error("Parse error at line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    /// A field parsed but holds a value outside its domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A second record arrived for a user that already has one
    #[error("Duplicate record for user '{user}' at line {line}")]
    DuplicateRecord { user: String, line: usize },

    /// A name was looked up that the store never saw
    #[error("Missing reference: {entity} '{name}'")]
    MissingReference { entity: String, name: String },

    /// Store-wide consistency check failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DataLoadError {
    /// True for errors that only invalidate a single record.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            DataLoadError::ParseError { .. }
                | DataLoadError::InvalidValue { .. }
                | DataLoadError::DuplicateRecord { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
