//! # Data Loader Crate
//!
//! This crate parses rating records and holds them for one pipeline run.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingRecord, UserScore, IndexTable, RatingStore)
//! - **parser**: Parse `user\tmovie$score;...` lines into records
//! - **index**: Build and validate the RatingStore
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{RatingStore, parse_records, read_lines};
//! use std::path::Path;
//!
//! let lines = read_lines(Path::new("ratings.txt"))?;
//! let parsed = parse_records(&lines);
//! let (store, rejected) = RatingStore::from_records(&parsed.records);
//! store.validate()?;
//!
//! let alice = store.user_index("alice").unwrap();
//! println!("alice is user #{} and rated {:?}", alice, store.user_ratings("alice"));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{ParsedRecords, parse_record, parse_records, read_lines};
pub use types::{
    // Type aliases and constants
    MovieIndex,
    Score,
    UserIndex,
    MAX_SCORE,
    UNRATED,
    is_unrated,
    // Core types
    IndexTable,
    MovieRating,
    RatingRecord,
    RatingStore,
    UserScore,
};
