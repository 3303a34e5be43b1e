//! Errors raised by the reference engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    /// The requested name is not in the rating table
    #[error("Unknown user: '{0}'")]
    UnknownUser(String),

    /// Fewer other users exist than neighbours are needed
    #[error("Need {needed} other users, table has {found}")]
    NotEnoughUsers { needed: usize, found: usize },

    /// The table does not have one row per user
    #[error("Table has {found} rows for {expected} users")]
    RowCountMismatch { expected: usize, found: usize },

    /// A row does not have one score per movie
    #[error("Row for '{user}' has {found} scores, expected {expected}")]
    RaggedRow {
        user: String,
        expected: usize,
        found: usize,
    },

    /// The interactive session could not read or write
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
