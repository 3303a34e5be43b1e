//! Filter implementations for the recommendation pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod already_rated;
pub mod average_threshold;

// Re-export for convenience
pub use already_rated::AlreadyRatedFilter;
pub use average_threshold::AverageThresholdFilter;
