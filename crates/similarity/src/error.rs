//! Errors raised while building, registering or aggregating similarity
//! matrices.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Two matrices of different sizes were combined
    #[error("Matrix size mismatch: expected {expected}x{expected}, found {found}x{found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// A rating list named a user with no index
    #[error("Movie '{movie}': unknown user '{user}'")]
    UnknownUser { movie: String, user: String },

    /// A rating list named the same user twice
    #[error("Movie '{movie}': user '{user}' rated more than once")]
    DuplicateUser { movie: String, user: String },

    /// A rating list did not cover every known user
    #[error("Movie '{movie}': expected ratings from {expected} users, found {found}")]
    IncompleteRatings {
        movie: String,
        expected: usize,
        found: usize,
    },

    /// The same movie arrived at the registry twice
    #[error("Movie '{0}' already registered")]
    DuplicateMovie(String),

    /// More movies arrived than the registry was told to expect
    #[error("Movie '{movie}' arrived after all {expected} expected movies")]
    UnexpectedMovie { movie: String, expected: usize },

    /// Aggregation was requested before every movie arrived
    #[error("Barrier not reached: {arrived} of {expected} movies arrived")]
    BarrierNotReached { expected: usize, arrived: usize },
}

pub type Result<T> = std::result::Result<T, SimilarityError>;
