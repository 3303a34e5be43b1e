//! Pairwise Similarity Builder
//!
//! Turns one movie's rating list into that movie's contribution to user
//! similarity:
//!
//! ```text
//! contribution(i, j) = 5 - |score_i - score_j|    (i != j)
//! contribution(i, i) = 0
//! ```
//!
//! The result is a `userCount x userCount` matrix indexed by user index, so
//! the rating list must cover every known user exactly once. Order within
//! the list does not matter.

use crate::error::{Result, SimilarityError};
use crate::matrix::SimilarityMatrix;
use data_loader::{IndexTable, MAX_SCORE, Score, UserIndex, UserScore};
use tracing::debug;

/// Builds per-movie similarity matrices against a fixed user table
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseSimilarityBuilder;

impl PairwiseSimilarityBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Similarity contribution of two scores on one movie
    pub fn contribution(a: Score, b: Score) -> f64 {
        MAX_SCORE - (a - b).abs()
    }

    /// Build the matrix for `movie` from its complete rating list
    pub fn build(
        &self,
        movie: &str,
        ratings: &[UserScore],
        users: &IndexTable,
    ) -> Result<SimilarityMatrix> {
        let scores = self.resolve(movie, ratings, users)?;
        let user_count = scores.len();

        let mut matrix = SimilarityMatrix::zeros(user_count);
        for i in 0..user_count {
            for j in (i + 1)..user_count {
                let value = Self::contribution(scores[i], scores[j]);
                matrix.set(i, j, value);
                matrix.set(j, i, value);
            }
        }

        debug!("Built {}x{} similarity matrix for movie '{}'", user_count, user_count, movie);
        Ok(matrix)
    }

    /// Place each score at its user's index, checking coverage
    fn resolve(&self, movie: &str, ratings: &[UserScore], users: &IndexTable) -> Result<Vec<Score>> {
        let user_count = users.len();
        let mut scores: Vec<Option<Score>> = vec![None; user_count];

        for entry in ratings {
            let index: UserIndex =
                users
                    .get(&entry.user)
                    .ok_or_else(|| SimilarityError::UnknownUser {
                        movie: movie.to_string(),
                        user: entry.user.clone(),
                    })?;
            if scores[index].replace(entry.score).is_some() {
                return Err(SimilarityError::DuplicateUser {
                    movie: movie.to_string(),
                    user: entry.user.clone(),
                });
            }
        }

        let found = scores.iter().filter(|s| s.is_some()).count();
        if found != user_count {
            return Err(SimilarityError::IncompleteRatings {
                movie: movie.to_string(),
                expected: user_count,
                found,
            });
        }

        Ok(scores.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users(names: &[&str]) -> IndexTable {
        let mut table = IndexTable::new();
        for name in names {
            table.assign(name);
        }
        table
    }

    #[test]
    fn test_contribution() {
        assert_eq!(PairwiseSimilarityBuilder::contribution(5.0, 4.0), 4.0);
        assert_eq!(PairwiseSimilarityBuilder::contribution(0.0, 5.0), 0.0);
        assert_eq!(PairwiseSimilarityBuilder::contribution(3.0, 3.0), 5.0);
    }

    #[test]
    fn test_build_single_movie() {
        let table = users(&["A", "B", "C"]);
        let ratings = vec![
            UserScore::new("A", 5.0),
            UserScore::new("B", 4.0),
            UserScore::new("C", 1.0),
        ];
        let m = PairwiseSimilarityBuilder::new().build("M1", &ratings, &table).unwrap();

        assert_eq!(m.get(0, 1), 4.0);
        assert_eq!(m.get(0, 2), 1.0);
        assert_eq!(m.get(1, 2), 2.0);
        assert!(m.diagonal_is_zero());
        assert!(m.is_symmetric());
    }

    #[test]
    fn test_list_order_does_not_matter() {
        let table = users(&["A", "B", "C"]);
        let forward = vec![
            UserScore::new("A", 5.0),
            UserScore::new("B", 4.0),
            UserScore::new("C", 1.0),
        ];
        let shuffled = vec![
            UserScore::new("C", 1.0),
            UserScore::new("A", 5.0),
            UserScore::new("B", 4.0),
        ];
        let builder = PairwiseSimilarityBuilder::new();
        assert_eq!(
            builder.build("M1", &forward, &table).unwrap(),
            builder.build("M1", &shuffled, &table).unwrap()
        );
    }

    #[test]
    fn test_equal_scores_still_zero_on_diagonal() {
        let table = users(&["A", "B"]);
        let ratings = vec![UserScore::new("A", 3.0), UserScore::new("B", 3.0)];
        let m = PairwiseSimilarityBuilder::new().build("M", &ratings, &table).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 5.0);
    }

    #[test]
    fn test_incomplete_list() {
        let table = users(&["A", "B", "C"]);
        let ratings = vec![UserScore::new("A", 5.0), UserScore::new("B", 4.0)];
        let err = PairwiseSimilarityBuilder::new().build("M1", &ratings, &table).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::IncompleteRatings {
                movie: "M1".to_string(),
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_unknown_and_duplicate_users() {
        let table = users(&["A", "B"]);
        let builder = PairwiseSimilarityBuilder::new();

        let unknown = vec![UserScore::new("A", 5.0), UserScore::new("Z", 4.0)];
        assert!(matches!(
            builder.build("M", &unknown, &table),
            Err(SimilarityError::UnknownUser { .. })
        ));

        let duplicate = vec![UserScore::new("A", 5.0), UserScore::new("A", 4.0)];
        assert!(matches!(
            builder.build("M", &duplicate, &table),
            Err(SimilarityError::DuplicateUser { .. })
        ));
    }
}
