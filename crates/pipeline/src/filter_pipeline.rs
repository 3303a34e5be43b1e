//! Ordered composition of [`Filter`]s.

use crate::filters::{AlreadyRatedFilter, AverageThresholdFilter};
use crate::traits::Filter;
use crate::types::{Candidate, TargetContext};
use anyhow::Result;

/// Filters applied one after another, each seeing the previous output.
///
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AverageThresholdFilter)
///     .add_filter(AlreadyRatedFilter);
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// A pipeline that lets everything through
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The recommendation filter: score at or above the average, and not
    /// yet rated by the target.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(AverageThresholdFilter)
            .add_filter(AlreadyRatedFilter)
    }

    /// Append `filter` after the existing ones
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in order; the first failure stops the pipeline
    pub fn apply(&self, candidates: Vec<Candidate>, context: &TargetContext) -> Result<Vec<Candidate>> {
        self.filters.iter().try_fold(candidates, |current, filter| {
            let before = current.len();
            let kept = filter.apply(current, context)?;
            tracing::debug!(
                "{} for user {}: {} -> {} candidates",
                filter.name(),
                context.user,
                before,
                kept.len()
            );
            Ok(kept)
        })
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
