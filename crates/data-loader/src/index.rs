//! RatingStore building and validation.
//!
//! Records are inserted one at a time, in input order, so user indices are
//! a deterministic function of the input and never of thread scheduling.

use crate::error::{DataLoadError, Result};
use crate::types::*;

impl RatingStore {
    /// Insert one parsed record, assigning the user its index
    ///
    /// A user may only contribute one record per run; a second record for the
    /// same user is rejected and leaves the store untouched.
    pub fn insert_record(&mut self, record: &RatingRecord) -> Result<UserIndex> {
        if self.users.contains(&record.user) {
            return Err(DataLoadError::DuplicateRecord {
                user: record.user.clone(),
                line: record.line,
            });
        }

        let index = self.users.assign(&record.user);
        let movie_scores = self.user_ratings.entry(record.user.clone()).or_default();
        for rating in &record.ratings {
            movie_scores.insert(rating.movie.clone(), rating.score);
            self.movie_ratings
                .entry(rating.movie.clone())
                .or_default()
                .push(UserScore::new(record.user.as_str(), rating.score));
        }
        Ok(index)
    }

    /// Build a store from already-parsed records
    ///
    /// Movies are indexed in the order they first appear across records.
    /// Returns the store together with every record it refused.
    pub fn from_records(records: &[RatingRecord]) -> (Self, Vec<DataLoadError>) {
        let mut store = RatingStore::new();
        let mut rejected = Vec::new();
        for record in records {
            match store.insert_record(record) {
                Ok(_) => {
                    for rating in &record.ratings {
                        store.assign_movie(&rating.movie);
                    }
                }
                Err(e) => {
                    tracing::warn!("Skipping record: {}", e);
                    rejected.push(e);
                }
            }
        }
        (store, rejected)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - every user has a score (possibly the unrated sentinel) for every movie
    /// - every score lies in [0, 5]
    ///
    /// The per-movie similarity matrices are only symmetric and complete when
    /// the first condition holds.
    pub fn validate(&self) -> Result<()> {
        for user in self.users.names() {
            let ratings = self.user_ratings.get(user).ok_or_else(|| {
                DataLoadError::MissingReference {
                    entity: "User ratings".to_string(),
                    name: user.clone(),
                }
            })?;

            for movie in self.movie_ratings.keys() {
                match ratings.get(movie) {
                    None => {
                        return Err(DataLoadError::ValidationError(format!(
                            "user '{}' has no score for movie '{}'",
                            user, movie
                        )));
                    }
                    Some(&score) if !(UNRATED..=MAX_SCORE).contains(&score) => {
                        return Err(DataLoadError::InvalidValue {
                            field: "score".to_string(),
                            value: score.to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
