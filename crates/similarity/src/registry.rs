//! Similarity registry and the aggregation barrier.
//!
//! The registry is told up front how many movie groups will be built. Every
//! builder outcome counts as one arrival: either a matrix is registered or
//! the movie is skipped with a reason. Aggregation is refused until all
//! expected arrivals are in, and once they are, the registry accepts nothing
//! further.

use crate::aggregate::GlobalSimilarity;
use crate::error::{Result, SimilarityError};
use crate::matrix::SimilarityMatrix;
use parking_lot::{Mutex, MutexGuard};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct RegistryState {
    /// Keyed by movie name so summation order is stable across runs
    matrices: BTreeMap<String, SimilarityMatrix>,
    skipped: Vec<(String, String)>,
    seen: HashSet<String>,
}

impl RegistryState {
    fn arrived(&self) -> usize {
        self.seen.len()
    }
}

/// Collects per-movie matrices from concurrent builders
#[derive(Debug)]
pub struct SimilarityRegistry {
    user_count: usize,
    expected_movies: usize,
    state: Mutex<RegistryState>,
}

impl SimilarityRegistry {
    pub fn new(user_count: usize, expected_movies: usize) -> Self {
        Self {
            user_count,
            expected_movies,
            state: Mutex::new(RegistryState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock()
    }

    fn admit(&self, state: &mut RegistryState, movie: &str) -> Result<()> {
        if state.seen.contains(movie) {
            return Err(SimilarityError::DuplicateMovie(movie.to_string()));
        }
        if state.arrived() >= self.expected_movies {
            return Err(SimilarityError::UnexpectedMovie {
                movie: movie.to_string(),
                expected: self.expected_movies,
            });
        }
        state.seen.insert(movie.to_string());
        Ok(())
    }

    /// Record the matrix built for `movie`
    pub fn register(&self, movie: &str, matrix: SimilarityMatrix) -> Result<()> {
        if matrix.size() != self.user_count {
            return Err(SimilarityError::DimensionMismatch {
                expected: self.user_count,
                found: matrix.size(),
            });
        }
        let mut state = self.lock();
        self.admit(&mut state, movie)?;
        state.matrices.insert(movie.to_string(), matrix);
        debug!(
            "Registered movie '{}' ({}/{})",
            movie,
            state.arrived(),
            self.expected_movies
        );
        Ok(())
    }

    /// Record that `movie` produced no matrix; it still counts as arrived
    pub fn skip(&self, movie: &str, reason: impl Into<String>) -> Result<()> {
        let reason = reason.into();
        let mut state = self.lock();
        self.admit(&mut state, movie)?;
        warn!("Skipping movie '{}': {}", movie, reason);
        state.skipped.push((movie.to_string(), reason));
        Ok(())
    }

    pub fn expected(&self) -> usize {
        self.expected_movies
    }

    pub fn arrived(&self) -> usize {
        self.lock().arrived()
    }

    /// True once every expected movie has arrived
    pub fn is_complete(&self) -> bool {
        self.arrived() == self.expected_movies
    }

    pub fn user_count(&self) -> usize {
        self.user_count
    }

    /// Movies skipped so far, with reasons
    pub fn skipped(&self) -> Vec<(String, String)> {
        self.lock().skipped.clone()
    }

    /// Copy of the matrix registered for `movie`
    pub fn matrix(&self, movie: &str) -> Option<SimilarityMatrix> {
        self.lock().matrices.get(movie).cloned()
    }

    /// Sum every registered matrix into the global similarity
    ///
    /// Fails with `BarrierNotReached` unless all expected movies arrived.
    pub fn aggregate(&self) -> Result<GlobalSimilarity> {
        let state = self.lock();
        let arrived = state.arrived();
        if arrived != self.expected_movies {
            return Err(SimilarityError::BarrierNotReached {
                expected: self.expected_movies,
                arrived,
            });
        }

        info!(
            "Aggregating {} movie matrices ({} skipped) over {} users",
            state.matrices.len(),
            state.skipped.len(),
            self.user_count
        );
        GlobalSimilarity::sum(self.user_count, state.matrices.values())
    }
}
