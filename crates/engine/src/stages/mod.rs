//! The four stages of a run, in execution order.
//!
//! - map: parse records, index users, emit `(movie, user$score)`
//! - shuffle: group emissions by movie, index movies, open the registry
//! - combine: build and register per-movie matrices, emit reduce keys
//! - reduce: aggregate on first use, then recommend per user

pub mod map;
pub mod shuffle;
pub mod combine;
pub mod reduce;

pub use combine::ReduceKey;
pub use map::{MapOutput, MapResult};
pub use reduce::{FailedUser, ReduceResult};
pub use shuffle::MovieGroup;
