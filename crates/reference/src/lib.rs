//! Standalone, distance-based reference recommender.
//!
//! Works on a dense [`RatingTable`] (a built-in sample, or a copy of a
//! rating store) without any of the batch machinery. Useful as a sanity
//! check next to the engine and as a small interactive demo.

pub mod error;
pub mod table;
pub mod engine;
pub mod session;

pub use engine::{MovieScore, ReferenceEngine};
pub use error::{ReferenceError, Result};
pub use session::{SessionStats, run_session};
pub use table::RatingTable;
