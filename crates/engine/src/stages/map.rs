//! Map stage: raw lines into the rating store and per-movie emissions.

use crate::context::JobContext;
use data_loader::{DataLoadError, UserScore, parse_records};
use tracing::{info, warn};

/// One `(movie, user$score)` pair headed for the shuffle
#[derive(Debug, Clone, PartialEq)]
pub struct MapOutput {
    pub movie: String,
    pub rating: UserScore,
}

#[derive(Debug, Default)]
pub struct MapResult {
    pub emitted: Vec<MapOutput>,
    /// Records that failed to parse or were refused by the store
    pub rejected: Vec<DataLoadError>,
}

/// Parse `lines` and record every accepted user in the context's store
///
/// Parsing runs in parallel; insertion is a sequential pass in input order,
/// so user indices follow first appearance.
pub fn run(ctx: &JobContext, lines: &[String]) -> MapResult {
    let parsed = parse_records(lines);
    let mut result = MapResult {
        emitted: Vec::new(),
        rejected: parsed.rejected,
    };

    let mut store = ctx.store_mut();
    for record in &parsed.records {
        if let Err(e) = store.insert_record(record) {
            warn!("Skipping record: {}", e);
            result.rejected.push(e);
            continue;
        }
        result
            .emitted
            .extend(record.ratings.iter().map(|rating| MapOutput {
                movie: rating.movie.clone(),
                rating: UserScore::new(record.user.as_str(), rating.score),
            }));
    }

    info!(
        "Map: {} users, {} emissions, {} records rejected",
        store.user_count(),
        result.emitted.len(),
        result.rejected.len()
    );
    result
}
