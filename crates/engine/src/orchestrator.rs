//! # Pipeline Runner
//!
//! This module coordinates one complete run:
//! 1. Read input lines (from a file or memory)
//! 2. Map: parse records and fill the rating store
//! 3. Shuffle: group ratings by movie
//! 4. Combine: per-movie similarity matrices, registered behind the barrier
//! 5. Reduce: aggregate once, then recommend for every user
//! 6. Collect recommendations and every per-record, per-movie and per-user
//!    failure into a report
//!
//! Each run owns a fresh [`JobContext`], so runs never share state.

use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use data_loader::{DataLoadError, read_lines};
use pipeline::{NeighborCount, Recommendation, Recommender};

use crate::context::JobContext;
use crate::stages::{self, FailedUser};

/// Tunables for a run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunConfig {
    pub neighbors: NeighborCount,
}

impl RunConfig {
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbors = NeighborCount::Fixed(k);
        self
    }
}

/// Everything a run produced
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// One entry per user, in user index order
    pub recommendations: Vec<Recommendation>,
    pub skipped_records: Vec<DataLoadError>,
    /// Why the store failed its completeness check after the map, if it did
    pub incomplete_store: Option<DataLoadError>,
    /// `(movie, reason)` for every movie without a matrix
    pub skipped_movies: Vec<(String, String)>,
    pub failed_users: Vec<FailedUser>,
    pub elapsed: Duration,
}

impl PipelineReport {
    /// Output records, one line per recommended user
    pub fn output_records(&self) -> Vec<String> {
        self.recommendations
            .iter()
            .map(Recommendation::to_output_record)
            .collect()
    }

    pub fn write_output<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for record in self.output_records() {
            writeln!(writer, "{}", record)?;
        }
        writer.flush()
    }

    /// True when no record, movie or user had to be skipped
    pub fn is_clean(&self) -> bool {
        self.skipped_records.is_empty()
            && self.incomplete_store.is_none()
            && self.skipped_movies.is_empty()
            && self.failed_users.is_empty()
    }
}

/// Runs the map, shuffle, combine and reduce stages end to end
pub struct PipelineRunner {
    recommender: Recommender,
}

impl PipelineRunner {
    pub fn new() -> Self {
        Self::with_config(RunConfig::default())
    }

    pub fn with_config(config: RunConfig) -> Self {
        Self {
            recommender: Recommender::new().with_neighbor_policy(config.neighbors),
        }
    }

    /// Run over every line of `path`
    ///
    /// A missing input file aborts the run.
    pub fn run_file(&self, path: &Path) -> Result<PipelineReport> {
        info!("Reading rating records from {:?}", path);
        let lines = read_lines(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?;
        self.run_lines(&lines)
    }

    /// Run over in-memory record lines
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub fn run_lines(&self, lines: &[String]) -> Result<PipelineReport> {
        let start_time = Instant::now();
        let ctx = JobContext::new();

        // Map
        let mapped = stages::map::run(&ctx, lines);
        let incomplete_store = match ctx.store().validate() {
            Ok(()) => {
                debug!("Rating store complete after map");
                None
            }
            Err(e) => {
                warn!("Rating store incomplete, affected movies will be skipped: {}", e);
                Some(e)
            }
        };

        // Shuffle
        let groups = stages::shuffle::run(&ctx, mapped.emitted)
            .context("Failed to group ratings by movie")?;

        // Combine
        let keys = stages::combine::run(&ctx, &groups)
            .context("Failed to build per-movie similarity")?;
        let skipped_movies = ctx.registry()?.skipped();

        // Reduce
        let reduced = stages::reduce::run(&ctx, &keys, &self.recommender);

        let elapsed = start_time.elapsed();
        info!(
            "Run finished in {:.2?}: {} users recommended, {} records skipped, {} movies skipped, {} users failed",
            elapsed,
            reduced.recommendations.len(),
            mapped.rejected.len(),
            skipped_movies.len(),
            reduced.failed.len()
        );

        Ok(PipelineReport {
            recommendations: reduced.recommendations,
            skipped_records: mapped.rejected,
            incomplete_store,
            skipped_movies,
            failed_users: reduced.failed,
            elapsed,
        })
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}
