//! Types flowing through the recommendation stage.

use anyhow::{Result, anyhow};
use data_loader::{MovieIndex, RatingStore, Score, UNRATED, UserIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A movie with its weighted recommendation score for one target user
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie_index: MovieIndex,
    pub movie: String,
    pub score: f64,
}

impl Candidate {
    pub fn new(movie_index: MovieIndex, movie: impl Into<String>, score: f64) -> Self {
        Self {
            movie_index,
            movie: movie.into(),
            score,
        }
    }
}

/// Everything the filters need to know about the target user
#[derive(Debug, Clone)]
pub struct TargetContext {
    pub user_index: UserIndex,
    pub user: String,
    /// The target's own scores keyed by movie name
    pub own_ratings: HashMap<String, Score>,
    /// Mean recommendation score over every movie, rated or not
    pub average_score: f64,
}

impl TargetContext {
    pub fn new(user_index: UserIndex, user: impl Into<String>) -> Self {
        Self {
            user_index,
            user: user.into(),
            own_ratings: HashMap::new(),
            average_score: 0.0,
        }
    }

    /// Build the context for `user_index` from the store
    pub fn build(store: &RatingStore, user_index: UserIndex, average_score: f64) -> Result<Self> {
        let user = store
            .user_name(user_index)
            .ok_or_else(|| anyhow!("User #{} not found", user_index))?;
        let own_ratings = store.user_ratings(user).cloned().unwrap_or_default();

        Ok(Self {
            user_index,
            user: user.to_string(),
            own_ratings,
            average_score,
        })
    }

    /// The target's score for `movie`; a missing score reads as unrated
    pub fn own_rating(&self, movie: &str) -> Score {
        self.own_ratings.get(movie).copied().unwrap_or(UNRATED)
    }
}

/// One line of the final recommendation list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedMovie {
    pub movie: String,
    pub score: f64,
}

/// Ranked recommendations for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user: String,
    /// Names of the neighbours whose ratings produced the scores
    pub neighbors: Vec<String>,
    pub movies: Vec<RecommendedMovie>,
}

impl Recommendation {
    /// `<user>\t<movie>[<score>]; <movie>[<score>]; `
    pub fn to_output_record(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", self.user)?;
        for item in &self.movies {
            write!(f, "{}[{:.2}]; ", item.movie, item.score)?;
        }
        Ok(())
    }
}
