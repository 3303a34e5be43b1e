//! Filter to keep candidates scoring at least the average.
//!
//! The average is taken over every movie's recommendation score, including
//! movies the target already rated, and is carried in the TargetContext.

use crate::traits::Filter;
use crate::types::{Candidate, TargetContext};
use anyhow::Result;

/// Removes candidates scoring strictly below `context.average_score`.
pub struct AverageThresholdFilter;

impl Filter for AverageThresholdFilter {
    fn name(&self) -> &str {
        "AverageThresholdFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &TargetContext) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.score >= context.average_score)
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        let mut context = TargetContext::new(0, "A");
        context.average_score = 27.0;

        let candidates = vec![
            Candidate::new(0, "M1", 36.0),
            Candidate::new(1, "M2", 0.0),
            Candidate::new(2, "M3", 27.0),
        ];

        let filtered = AverageThresholdFilter.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].movie, "M1");
        assert_eq!(filtered[1].movie, "M3");
    }

    #[test]
    fn test_all_zero_scores_pass_zero_average() {
        let context = TargetContext::new(0, "A");
        let candidates = vec![Candidate::new(0, "M1", 0.0), Candidate::new(1, "M2", 0.0)];
        let filtered = AverageThresholdFilter.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
