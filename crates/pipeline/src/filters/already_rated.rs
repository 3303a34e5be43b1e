//! Filter to remove movies the target has already rated.
//!
//! A movie counts as rated when the target's own score differs from the
//! unrated sentinel. There is no point recommending those.

use crate::traits::Filter;
use crate::types::{Candidate, TargetContext};
use anyhow::Result;
use data_loader::is_unrated;

/// Keeps only candidates whose own score is the unrated sentinel.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &TargetContext) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| is_unrated(context.own_rating(&candidate.movie)))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_rated_filter() {
        let mut context = TargetContext::new(0, "A");
        context.own_ratings.insert("M1".to_string(), 4.5);
        context.own_ratings.insert("M2".to_string(), 0.0);
        context.own_ratings.insert("M3".to_string(), 1.0);

        let candidates = vec![
            Candidate::new(0, "M1", 10.0),
            Candidate::new(1, "M2", 9.0),
            Candidate::new(2, "M3", 8.0),
            Candidate::new(3, "M4", 7.0),
        ];

        let filtered = AlreadyRatedFilter.apply(candidates, &context).unwrap();

        // M4 has no recorded score, which reads as unrated
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].movie, "M2");
        assert_eq!(filtered[1].movie, "M4");
    }
}
