//! Per-run shared state.
//!
//! A [`JobContext`] is created at the start of a run, handed by reference to
//! every stage and dropped when the run ends. Nothing outlives it.

use anyhow::{Context, Result, anyhow};
use data_loader::{RatingStore, UserIndex};
use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use similarity::{GlobalSimilarity, SimilarityRegistry};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct JobContext {
    store: RwLock<RatingStore>,
    /// Opened by the shuffle once the number of movie groups is known
    registry: OnceLock<SimilarityRegistry>,
    /// Users that already have a reduce key
    emitted: Mutex<HashSet<UserIndex>>,
    global: OnceLock<GlobalSimilarity>,
    /// Serializes the first aggregation
    aggregation: Mutex<()>,
}

impl JobContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> RwLockReadGuard<'_, RatingStore> {
        self.store.read()
    }

    pub(crate) fn store_mut(&self) -> RwLockWriteGuard<'_, RatingStore> {
        self.store.write()
    }

    /// Create the registry expecting `expected_movies` builder outcomes
    pub fn open_registry(&self, user_count: usize, expected_movies: usize) -> Result<&SimilarityRegistry> {
        let registry = SimilarityRegistry::new(user_count, expected_movies);
        self.registry
            .set(registry)
            .map_err(|_| anyhow!("Similarity registry already opened for this run"))?;
        debug!(
            "Registry opened: {} users, {} movie groups expected",
            user_count, expected_movies
        );
        self.registry()
    }

    pub fn registry(&self) -> Result<&SimilarityRegistry> {
        self.registry
            .get()
            .ok_or_else(|| anyhow!("Similarity registry has not been opened"))
    }

    /// Claim the reduce key for `user`; true only for the first claim
    pub fn claim_reduce_key(&self, user: UserIndex) -> bool {
        self.emitted.lock().insert(user)
    }

    /// The aggregated similarity, computed on first use
    ///
    /// Fails while any expected movie group has not arrived at the registry.
    pub fn global_similarity(&self) -> Result<&GlobalSimilarity> {
        if let Some(global) = self.global.get() {
            return Ok(global);
        }

        let _guard = self.aggregation.lock();
        if let Some(global) = self.global.get() {
            return Ok(global);
        }

        let global = self
            .registry()?
            .aggregate()
            .context("Global similarity is not available yet")?;
        info!("Global similarity ready ({} users)", global.size());
        debug!("Global similarity matrix:\n{}", global.matrix());
        Ok(self.global.get_or_init(|| global))
    }

    pub fn is_aggregated(&self) -> bool {
        self.global.get().is_some()
    }
}
