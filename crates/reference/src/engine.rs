//! Distance-based recommender over a [`RatingTable`].
//!
//! Similarity is the Euclidean distance between full rating vectors, so a
//! smaller value means a closer user. Scores weight each neighbour's rating
//! by that raw distance.

use crate::error::{ReferenceError, Result};
use crate::table::RatingTable;
use data_loader::{Score, is_unrated};
use similarity::{Neighbor, Polarity};
use tracing::debug;

/// A movie's column in the table with its recommendation score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieScore {
    pub index: usize,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ReferenceEngine {
    table: RatingTable,
    neighbor_count: usize,
}

impl ReferenceEngine {
    pub const POLARITY: Polarity = Polarity::LowerIsCloser;
    const NEIGHBORS: usize = 2;

    pub fn new(table: RatingTable) -> Self {
        Self {
            table,
            neighbor_count: Self::NEIGHBORS,
        }
    }

    pub fn table(&self) -> &RatingTable {
        &self.table
    }

    /// Euclidean distance between two rating vectors
    pub fn distance(a: &[Score], b: &[Score]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .fold(0.0, |acc, d| acc + d)
            .sqrt()
    }

    /// The closest other users to `target`, closest first
    ///
    /// Users at equal distance keep table order.
    pub fn nearest(&self, target: usize) -> Result<Vec<Neighbor>> {
        let own = self.table.row(target);
        let mut others: Vec<Neighbor> = (0..self.table.user_count())
            .filter(|&i| i != target)
            .map(|i| Neighbor::new(i, Self::distance(self.table.row(i), own)))
            .collect();

        if others.len() < self.neighbor_count {
            return Err(ReferenceError::NotEnoughUsers {
                needed: self.neighbor_count,
                found: others.len(),
            });
        }

        others.sort_by(|a, b| Self::POLARITY.closest_first(a.value, b.value));
        others.truncate(self.neighbor_count);
        Ok(others)
    }

    /// Σ neighbour rating × distance, per movie in table order
    pub fn score(&self, neighbors: &[Neighbor]) -> Vec<MovieScore> {
        (0..self.table.movie_count())
            .map(|movie| MovieScore {
                index: movie,
                score: neighbors
                    .iter()
                    .map(|n| self.table.row(n.index)[movie] * n.value)
                    .fold(0.0, |acc, part| acc + part),
            })
            .collect()
    }

    /// Movies for `user`, best first
    ///
    /// Keeps movies scoring strictly above the average over all movies, then
    /// drops the ones `user` already rated.
    pub fn recommend(&self, user: &str) -> Result<Vec<String>> {
        let target = self
            .table
            .user_index(user)
            .ok_or_else(|| ReferenceError::UnknownUser(user.to_string()))?;

        let neighbors = self.nearest(target)?;
        debug!(
            "{} nearest: {:?}",
            user,
            neighbors
                .iter()
                .map(|n| self.table.users()[n.index].as_str())
                .collect::<Vec<_>>()
        );

        let mut scores = self.score(&neighbors);
        let average = scores.iter().fold(0.0, |acc, s| acc + s.score) / scores.len().max(1) as f64;
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        let own = self.table.row(target);
        Ok(scores
            .into_iter()
            .filter(|s| s.score > average)
            .filter(|s| is_unrated(own[s.index]))
            .map(|s| self.table.movies()[s.index].clone())
            .collect())
    }
}

impl Default for ReferenceEngine {
    fn default() -> Self {
        Self::new(RatingTable::sample())
    }
}
