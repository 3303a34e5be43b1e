//! Reduce: one recommendation per reduce key.

use crate::context::JobContext;
use crate::stages::combine::ReduceKey;
use pipeline::{Recommendation, Recommender};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

/// A user whose recommendation could not be produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedUser {
    pub user: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct ReduceResult {
    /// In reduce key order
    pub recommendations: Vec<Recommendation>,
    pub failed: Vec<FailedUser>,
}

/// Recommend for every key in parallel
///
/// Each invocation reaches the global similarity through the context, so
/// the first one to get there triggers aggregation.
pub fn run(ctx: &JobContext, keys: &[ReduceKey], recommender: &Recommender) -> ReduceResult {
    let store = ctx.store();

    let outcomes: Vec<(&ReduceKey, anyhow::Result<Recommendation>)> = keys
        .par_iter()
        .map(|key| {
            let outcome = ctx
                .global_similarity()
                .and_then(|global| recommender.recommend(&store, global, key.index));
            (key, outcome)
        })
        .collect();

    let mut result = ReduceResult::default();
    for (key, outcome) in outcomes {
        match outcome {
            Ok(recommendation) => result.recommendations.push(recommendation),
            Err(e) => {
                warn!("No recommendations for user {}: {:#}", key, e);
                result.failed.push(FailedUser {
                    user: key.name.clone(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    info!(
        "Reduce: {} users recommended, {} failed",
        result.recommendations.len(),
        result.failed.len()
    );
    result
}
