//! Dense user × movie rating table.

use crate::error::{ReferenceError, Result};
use data_loader::{RatingStore, Score, UNRATED};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingTable {
    users: Vec<String>,
    movies: Vec<String>,
    /// One row per user, one column per movie
    scores: Vec<Vec<Score>>,
}

impl RatingTable {
    pub fn new(users: Vec<String>, movies: Vec<String>, scores: Vec<Vec<Score>>) -> Result<Self> {
        if scores.len() != users.len() {
            return Err(ReferenceError::RowCountMismatch {
                expected: users.len(),
                found: scores.len(),
            });
        }
        for (user, row) in users.iter().zip(&scores) {
            if row.len() != movies.len() {
                return Err(ReferenceError::RaggedRow {
                    user: user.clone(),
                    expected: movies.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            users,
            movies,
            scores,
        })
    }

    /// The built-in five-user, seven-movie sample
    pub fn sample() -> Self {
        let users = ["小明", "小花", "小美", "小张", "小李"];
        let rows: [[Score; 7]; 5] = [
            [3.0, 1.0, 4.0, 4.0, 1.0, 0.0, 0.0],
            [0.0, 5.0, 1.0, 0.0, 0.0, 4.0, 0.0],
            [1.0, 0.0, 5.0, 4.0, 3.0, 5.0, 2.0],
            [3.0, 1.0, 4.0, 3.0, 5.0, 0.0, 0.0],
            [5.0, 2.0, 0.0, 1.0, 0.0, 5.0, 5.0],
        ];
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            movies: (1..=7).map(|i| format!("电影{}", i)).collect(),
            scores: rows.iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Dense copy of a store, in user and movie index order
    ///
    /// Scores the store does not hold read as unrated.
    pub fn from_store(store: &RatingStore) -> Self {
        let users: Vec<String> = store.users().names().cloned().collect();
        let movies: Vec<String> = store.movies().names().cloned().collect();
        let scores = users
            .iter()
            .map(|user| {
                movies
                    .iter()
                    .map(|movie| store.rating(user, movie).unwrap_or(UNRATED))
                    .collect()
            })
            .collect();
        Self {
            users,
            movies,
            scores,
        }
    }

    /// Index of `name`; an empty name never matches
    pub fn user_index(&self, name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        self.users.iter().position(|u| u == name)
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn movies(&self) -> &[String] {
        &self.movies
    }

    pub fn row(&self, user: usize) -> &[Score] {
        &self.scores[user]
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }
}
