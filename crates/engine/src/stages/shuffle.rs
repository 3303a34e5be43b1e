//! Shuffle: group map emissions by movie.

use crate::context::JobContext;
use crate::stages::map::MapOutput;
use data_loader::{MovieIndex, UserScore};
use indexmap::IndexMap;
use tracing::info;

/// Every rating for one movie, ready for the builder
#[derive(Debug, Clone, PartialEq)]
pub struct MovieGroup {
    pub index: MovieIndex,
    pub movie: String,
    pub ratings: Vec<UserScore>,
}

/// Group emissions in first-appearance order and open the registry
///
/// Movie indices are assigned here, one per group.
pub fn run(ctx: &JobContext, emitted: Vec<MapOutput>) -> anyhow::Result<Vec<MovieGroup>> {
    let mut by_movie: IndexMap<String, Vec<UserScore>> = IndexMap::new();
    for MapOutput { movie, rating } in emitted {
        by_movie.entry(movie).or_default().push(rating);
    }

    let (groups, user_count) = {
        let mut store = ctx.store_mut();
        let groups: Vec<MovieGroup> = by_movie
            .into_iter()
            .map(|(movie, ratings)| MovieGroup {
                index: store.assign_movie(&movie),
                movie,
                ratings,
            })
            .collect();
        (groups, store.user_count())
    };

    ctx.open_registry(user_count, groups.len())?;
    info!("Shuffle: {} movie groups", groups.len());
    Ok(groups)
}
