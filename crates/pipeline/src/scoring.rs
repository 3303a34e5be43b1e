//! Weighted recommendation scores.
//!
//! For every movie, in movie index order:
//!
//! ```text
//! score(movie) = Σ over neighbours n of rating(n, movie) * similarity(target, n)
//! ```
//!
//! A neighbour without a recorded score for a movie contributes as unrated.

use crate::types::Candidate;
use anyhow::{Result, anyhow};
use data_loader::{RatingStore, UNRATED};
use similarity::Neighbor;

/// Score every movie in the store for one target
pub fn score_movies(store: &RatingStore, neighbors: &[Neighbor]) -> Result<Vec<Candidate>> {
    let mut neighbor_ratings = Vec::with_capacity(neighbors.len());
    for neighbor in neighbors {
        let name = store
            .user_name(neighbor.index)
            .ok_or_else(|| anyhow!("Neighbour #{} not found", neighbor.index))?;
        neighbor_ratings.push((store.user_ratings(name), neighbor.value));
    }

    let candidates = store
        .movies()
        .names()
        .enumerate()
        .map(|(movie_index, movie)| {
            let score = neighbor_ratings
                .iter()
                .map(|(ratings, weight)| {
                    let rating = ratings
                        .and_then(|r| r.get(movie).copied())
                        .unwrap_or(UNRATED);
                    rating * weight
                })
                .fold(0.0, |acc, part| acc + part);
            Candidate::new(movie_index, movie.as_str(), score)
        })
        .collect();

    Ok(candidates)
}

/// Mean score across all candidates; zero when there are none
pub fn average_score(candidates: &[Candidate]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    let total = candidates.iter().fold(0.0, |acc, c| acc + c.score);
    total / candidates.len() as f64
}
