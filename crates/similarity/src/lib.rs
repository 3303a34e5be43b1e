//! # Similarity Crate
//!
//! Builds user-to-user similarity from per-movie evidence.
//!
//! ## Components
//!
//! ### PairwiseSimilarityBuilder (combine)
//! For one movie, scores every pair of users by how closely they agree:
//! `5 - |score_a - score_b|`, with zero on the diagonal.
//!
//! ### SimilarityRegistry (barrier)
//! Collects per-movie matrices from concurrent builders and refuses to
//! aggregate until every expected movie has arrived.
//!
//! ### GlobalSimilarity (aggregate)
//! Elementwise sum of all per-movie matrices, always computed from zero.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{PairwiseSimilarityBuilder, SimilarityRegistry};
//!
//! let registry = SimilarityRegistry::new(store.user_count(), movie_groups.len());
//! let builder = PairwiseSimilarityBuilder::new();
//!
//! for (movie, ratings) in &movie_groups {
//!     let matrix = builder.build(movie, ratings, store.users())?;
//!     registry.register(movie, matrix)?;
//! }
//!
//! let global = registry.aggregate()?;
//! println!("sim(0, 1) = {}", global.similarity(0, 1));
//! ```

// Public modules
pub mod aggregate;
pub mod builder;
pub mod error;
pub mod matrix;
pub mod polarity;
pub mod registry;

// Re-export commonly used types
pub use aggregate::GlobalSimilarity;
pub use builder::PairwiseSimilarityBuilder;
pub use error::{Result, SimilarityError};
pub use matrix::SimilarityMatrix;
pub use polarity::{Neighbor, Polarity};
pub use registry::SimilarityRegistry;

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{IndexTable, UserScore};

    fn scenario_users() -> IndexTable {
        let mut users = IndexTable::new();
        for name in ["A", "B", "C"] {
            users.assign(name);
        }
        users
    }

    fn scenario_movies() -> Vec<(&'static str, Vec<UserScore>)> {
        vec![
            (
                "M1",
                vec![
                    UserScore::new("A", 5.0),
                    UserScore::new("B", 4.0),
                    UserScore::new("C", 1.0),
                ],
            ),
            (
                "M2",
                vec![
                    UserScore::new("A", 0.0),
                    UserScore::new("B", 0.0),
                    UserScore::new("C", 5.0),
                ],
            ),
            (
                "M3",
                vec![
                    UserScore::new("A", 0.0),
                    UserScore::new("B", 5.0),
                    UserScore::new("C", 0.0),
                ],
            ),
        ]
    }

    #[test]
    fn test_scenario_global_similarity() {
        let users = scenario_users();
        let movies = scenario_movies();
        let registry = SimilarityRegistry::new(users.len(), movies.len());
        let builder = PairwiseSimilarityBuilder::new();

        for (movie, ratings) in &movies {
            let matrix = builder.build(movie, ratings, &users).unwrap();
            registry.register(movie, matrix).unwrap();
        }

        let global = registry.aggregate().unwrap();
        assert_eq!(global.similarity(0, 1), 9.0);
        assert_eq!(global.similarity(0, 2), 6.0);
        assert_eq!(global.similarity(1, 2), 2.0);
        assert!(global.matrix().is_symmetric());
        assert!(global.matrix().diagonal_is_zero());
    }

    #[test]
    fn test_global_equals_sum_of_parts() {
        let users = scenario_users();
        let builder = PairwiseSimilarityBuilder::new();
        let parts: Vec<SimilarityMatrix> = scenario_movies()
            .iter()
            .map(|(movie, ratings)| builder.build(movie, ratings, &users).unwrap())
            .collect();

        let global = GlobalSimilarity::sum(3, &parts).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected: f64 = parts.iter().map(|m| m.get(i, j)).sum();
                assert_eq!(global.similarity(i, j), expected);
            }
        }
    }
}
