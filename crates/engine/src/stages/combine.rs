//! Combine: per-movie similarity matrices and reduce keys.

use crate::context::JobContext;
use crate::stages::shuffle::MovieGroup;
use anyhow::{Context, Result};
use data_loader::UserIndex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use similarity::PairwiseSimilarityBuilder;
use std::fmt;
use tracing::info;

/// Key for one reducer invocation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReduceKey {
    pub index: UserIndex,
    pub name: String,
}

impl fmt::Display for ReduceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}&{}", self.index, self.name)
    }
}

/// Build and register one matrix per group, in parallel
///
/// A group whose matrix cannot be built is skipped at the registry, which
/// still counts it as arrived. Reduce keys come back sorted by user index,
/// one per user across all groups.
pub fn run(ctx: &JobContext, groups: &[MovieGroup]) -> Result<Vec<ReduceKey>> {
    let builder = PairwiseSimilarityBuilder::new();
    let registry = ctx.registry()?;
    let store = ctx.store();

    let per_group: Vec<Vec<ReduceKey>> = groups
        .par_iter()
        .map(|group| -> Result<Vec<ReduceKey>> {
            let outcome = builder
                .build(&group.movie, &group.ratings, store.users())
                .and_then(|matrix| registry.register(&group.movie, matrix));
            if let Err(e) = outcome {
                registry
                    .skip(&group.movie, e.to_string())
                    .with_context(|| format!("Registry refused movie '{}'", group.movie))?;
            }

            let keys = group
                .ratings
                .iter()
                .filter_map(|rating| {
                    let index = store.user_index(&rating.user)?;
                    ctx.claim_reduce_key(index).then(|| ReduceKey {
                        index,
                        name: rating.user.clone(),
                    })
                })
                .collect();
            Ok(keys)
        })
        .collect::<Result<_>>()?;

    let mut keys: Vec<ReduceKey> = per_group.into_iter().flatten().collect();
    keys.sort();

    info!(
        "Combine: {}/{} movies arrived ({} skipped), {} reduce keys",
        registry.arrived(),
        registry.expected(),
        registry.skipped().len(),
        keys.len()
    );
    Ok(keys)
}
