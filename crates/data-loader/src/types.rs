//! Core domain types for rating data.
//!
//! This module defines the fundamental data structures shared by every
//! pipeline stage:
//! - Dense index aliases (UserIndex, MovieIndex)
//! - Parsed input records and the `user$score` values emitted by the map stage
//! - IndexTable, the first-seen-order name → index allocator
//! - RatingStore, the in-memory view of every observation in one run

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Type Aliases and Constants
// =============================================================================

/// Dense position of a user, assigned in first-seen order
pub type UserIndex = usize;

/// Dense position of a movie, assigned in first-seen order as a grouping key
pub type MovieIndex = usize;

/// A rating value in [0.0, 5.0]
pub type Score = f64;

/// Score meaning "the user has not rated this movie"
pub const UNRATED: Score = 0.0;

/// Highest possible score; also the ceiling of a per-movie similarity
pub const MAX_SCORE: Score = 5.0;

/// Returns true when `score` is the unrated sentinel.
pub fn is_unrated(score: Score) -> bool {
    score == UNRATED
}

// =============================================================================
// Record Types
// =============================================================================

/// One `movie$score` token of an input record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRating {
    pub movie: String,
    pub score: Score,
}

/// One parsed input line: a user and every movie score listed for them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// 1-based line number in the source, kept for error reporting
    pub line: usize,
    pub user: String,
    pub ratings: Vec<MovieRating>,
}

/// The value half of a map-stage emission: `user$score` for one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserScore {
    pub user: String,
    pub score: Score,
}

impl UserScore {
    pub fn new(user: impl Into<String>, score: Score) -> Self {
        Self {
            user: user.into(),
            score,
        }
    }
}

impl fmt::Display for UserScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}${:.1}", self.user, self.score)
    }
}

// =============================================================================
// IndexTable
// =============================================================================

/// Assigns each distinct name a dense index in first-seen order.
///
/// An index, once handed out, is never reassigned: asking again for a known
/// name returns its original index.
#[derive(Debug, Clone, Default)]
pub struct IndexTable {
    names: IndexSet<String>,
}

impl IndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `name`, allocating the next one if unseen.
    pub fn assign(&mut self, name: &str) -> usize {
        match self.names.get_index_of(name) {
            Some(index) => index,
            None => self.names.insert_full(name.to_string()).0,
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in index order
    pub fn names(&self) -> indexmap::set::Iter<'_, String> {
        self.names.iter()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// =============================================================================
// RatingStore - every observation of one pipeline run
// =============================================================================

/// Holds every (user, movie, score) observation of a single run.
///
/// Users are indexed as their records are inserted. Movies are indexed
/// separately through [`RatingStore::assign_movie`], which the shuffle calls
/// in the order movie keys first appear.
#[derive(Debug, Default)]
pub struct RatingStore {
    pub(crate) users: IndexTable,
    pub(crate) movies: IndexTable,

    /// user → (movie → score)
    pub(crate) user_ratings: HashMap<String, HashMap<String, Score>>,
    /// movie → every user's score for it, in insertion order
    pub(crate) movie_ratings: HashMap<String, Vec<UserScore>>,
}

impl RatingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &IndexTable {
        &self.users
    }

    pub fn movies(&self) -> &IndexTable {
        &self.movies
    }

    pub fn user_index(&self, user: &str) -> Option<UserIndex> {
        self.users.get(user)
    }

    pub fn user_name(&self, index: UserIndex) -> Option<&str> {
        self.users.name(index)
    }

    pub fn movie_index(&self, movie: &str) -> Option<MovieIndex> {
        self.movies.get(movie)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn movie_count(&self) -> usize {
        self.movies.len()
    }

    /// All of a user's ratings keyed by movie name
    pub fn user_ratings(&self, user: &str) -> Option<&HashMap<String, Score>> {
        self.user_ratings.get(user)
    }

    /// A single user's score for a movie, if recorded
    pub fn rating(&self, user: &str, movie: &str) -> Option<Score> {
        self.user_ratings.get(user)?.get(movie).copied()
    }

    /// All recorded scores for a movie
    ///
    /// Returns an empty slice for unknown movies
    pub fn movie_ratings(&self, movie: &str) -> &[UserScore] {
        self.movie_ratings
            .get(movie)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the index for `movie`, allocating the next one if unseen.
    pub fn assign_movie(&mut self, movie: &str) -> MovieIndex {
        self.movies.assign(movie)
    }

    /// Get counts for debugging/validation: (users, movies, ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.user_ratings.values().map(|m| m.len()).sum();
        (self.users.len(), self.movies.len(), total_ratings)
    }
}
