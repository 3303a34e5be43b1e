//! Recommendation stage: neighbours, scores, filters and ranking.
//!
//! This crate provides:
//! - Top-K neighbour selection over the global similarity matrix
//! - Weighted per-movie scoring from the selected neighbours
//! - Filter trait and implementations, composed by FilterPipeline
//! - Recommender, which ties the steps together for one user
//!
//! ## Architecture
//! Each target user is processed in stages:
//! 1. Neighbours are picked from the target's row of the global matrix
//! 2. Every movie is scored from the neighbours' ratings
//! 3. Filters drop movies below the average score or already rated
//! 4. Survivors are ranked by score
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::Recommender;
//!
//! let recommender = Recommender::new().with_neighbor_count(3);
//! let rec = recommender.recommend(&store, &global, user_index)?;
//! println!("{}", rec.to_output_record());
//! ```

pub mod traits;
pub mod types;
pub mod filters;
pub mod filter_pipeline;
pub mod neighbors;
pub mod scoring;
pub mod recommender;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use neighbors::{NeighborCount, select_neighbors};
pub use recommender::Recommender;
pub use types::{Candidate, Recommendation, RecommendedMovie, TargetContext};
