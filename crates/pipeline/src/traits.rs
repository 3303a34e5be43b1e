//! The seam between scoring and ranking.

use crate::types::{Candidate, TargetContext};
use anyhow::Result;

/// One step that narrows the scored candidates for a target user.
///
/// Filters run once per target and may be shared across the worker threads
/// that recommend for different users, hence `Send + Sync`. A filter must
/// keep the relative order of the candidates it lets through.
pub trait Filter: Send + Sync {
    /// Short label used in debug logs
    fn name(&self) -> &str;

    /// Return the candidates that survive this filter
    fn apply(&self, candidates: Vec<Candidate>, context: &TargetContext) -> Result<Vec<Candidate>>;
}
