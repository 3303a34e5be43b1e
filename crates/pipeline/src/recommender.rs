//! # Recommender
//!
//! Produces the ranked recommendation list for one target user from a
//! finalized [`GlobalSimilarity`]:
//!
//! 1. Select the top-K neighbours from the target's similarity row
//! 2. Score every movie by the neighbours' similarity-weighted ratings
//! 3. Average the scores over all movies
//! 4. Filter: score ≥ average and not yet rated by the target
//! 5. Rank by score, highest first (stable among equal scores)
//!
//! Taking `&GlobalSimilarity` means a recommendation can only be computed
//! after aggregation has completed.

use crate::filter_pipeline::FilterPipeline;
use crate::neighbors::{NeighborCount, select_neighbors};
use crate::scoring::{average_score, score_movies};
use crate::types::{Recommendation, RecommendedMovie, TargetContext};
use anyhow::{Context, Result, anyhow, ensure};
use data_loader::{RatingStore, UserIndex};
use similarity::GlobalSimilarity;
use tracing::{debug, instrument};

pub struct Recommender {
    neighbor_count: NeighborCount,
    filters: FilterPipeline,
}

impl Recommender {
    /// Quarter-of-users neighbourhood with the standard filters
    pub fn new() -> Self {
        Self {
            neighbor_count: NeighborCount::QuarterOfUsers,
            filters: FilterPipeline::standard(),
        }
    }

    /// Use exactly `k` neighbours instead of ⌊userCount / 4⌋
    pub fn with_neighbor_count(mut self, k: usize) -> Self {
        self.neighbor_count = NeighborCount::Fixed(k);
        self
    }

    pub fn with_neighbor_policy(mut self, policy: NeighborCount) -> Self {
        self.neighbor_count = policy;
        self
    }

    /// Replace the filter pipeline
    pub fn with_filters(mut self, filters: FilterPipeline) -> Self {
        self.filters = filters;
        self
    }

    pub fn neighbor_policy(&self) -> NeighborCount {
        self.neighbor_count
    }

    /// Recommend movies for the user at `target`
    #[instrument(skip(self, store, global))]
    pub fn recommend(
        &self,
        store: &RatingStore,
        global: &GlobalSimilarity,
        target: UserIndex,
    ) -> Result<Recommendation> {
        ensure!(
            global.size() == store.user_count(),
            "Similarity matrix covers {} users but the store holds {}",
            global.size(),
            store.user_count()
        );
        let user = store
            .user_name(target)
            .ok_or_else(|| anyhow!("User #{} not found", target))?;

        // Step 1: neighbours
        let k = self.neighbor_count.resolve(store.user_count());
        let neighbors = select_neighbors(global.row(target), target, k);
        let neighbor_names: Vec<String> = neighbors
            .iter()
            .filter_map(|n| store.user_name(n.index).map(str::to_string))
            .collect();
        debug!("User {} <===> similar users {:?}", user, neighbor_names);

        // Step 2 and 3: scores and their average
        let candidates = score_movies(store, &neighbors)
            .with_context(|| format!("Failed to score movies for user {}", user))?;
        let average = average_score(&candidates);

        // Step 4: filters
        let context = TargetContext::build(store, target, average)?;
        let mut kept = self.filters.apply(candidates, &context)?;

        // Step 5: rank
        kept.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!(
            "User {}: {} movies recommended (average score {:.2})",
            user,
            kept.len(),
            average
        );

        Ok(Recommendation {
            user: user.to_string(),
            neighbors: neighbor_names,
            movies: kept
                .into_iter()
                .map(|c| RecommendedMovie {
                    movie: c.movie,
                    score: c.score,
                })
                .collect(),
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::parse_record;
    use similarity::{PairwiseSimilarityBuilder, SimilarityRegistry};

    /// A=(5,0,0), B=(4,0,5), C=(1,5,0)
    fn scenario() -> (RatingStore, GlobalSimilarity) {
        let records = vec![
            parse_record(1, "A\tM1$5;M2$0;M3$0;").unwrap(),
            parse_record(2, "B\tM1$4;M2$0;M3$5;").unwrap(),
            parse_record(3, "C\tM1$1;M2$5;M3$0;").unwrap(),
        ];
        let (store, _) = RatingStore::from_records(&records);

        let builder = PairwiseSimilarityBuilder::new();
        let registry = SimilarityRegistry::new(store.user_count(), store.movie_count());
        for movie in store.movies().names() {
            let matrix = builder
                .build(movie, store.movie_ratings(movie), store.users())
                .unwrap();
            registry.register(movie, matrix).unwrap();
        }
        let global = registry.aggregate().unwrap();
        (store, global)
    }

    #[test]
    fn test_worked_scenario() {
        let (store, global) = scenario();
        let recommender = Recommender::new().with_neighbor_count(1);

        let rec = recommender.recommend(&store, &global, 0).unwrap();
        assert_eq!(rec.neighbors, vec!["B".to_string()]);
        assert_eq!(
            rec.movies,
            vec![RecommendedMovie {
                movie: "M3".to_string(),
                score: 45.0
            }]
        );
        assert_eq!(rec.to_output_record(), "A\tM3[45.00]; ");
    }

    #[test]
    fn test_default_k_is_zero_for_three_users() {
        let (store, global) = scenario();
        let rec = Recommender::new().recommend(&store, &global, 0).unwrap();

        // No neighbours: every score and the average are zero, so every
        // unrated movie passes.
        assert!(rec.neighbors.is_empty());
        let movies: Vec<&str> = rec.movies.iter().map(|m| m.movie.as_str()).collect();
        assert_eq!(movies, vec!["M2", "M3"]);
        assert!(rec.movies.iter().all(|m| m.score == 0.0));
    }

    #[test]
    fn test_never_recommends_rated_movies() {
        let (store, global) = scenario();
        let recommender = Recommender::new().with_neighbor_count(2);
        for target in 0..store.user_count() {
            let rec = recommender.recommend(&store, &global, target).unwrap();
            for item in &rec.movies {
                assert_eq!(store.rating(&rec.user, &item.movie), Some(0.0));
            }
        }
    }

    #[test]
    fn test_ranked_by_score_not_movie_order() {
        let records = vec![
            parse_record(1, "A\tM1$0;M2$5;M3$0;M4$0;M5$0;").unwrap(),
            parse_record(2, "B\tM1$3;M2$5;M3$2;M4$4;M5$0;").unwrap(),
            parse_record(3, "C\tM1$3;M2$4;M3$3;M4$5;M5$1;").unwrap(),
            parse_record(4, "D\tM1$0;M2$1;M3$5;M4$0;M5$5;").unwrap(),
            parse_record(5, "E\tM1$5;M2$0;M3$1;M4$1;M5$2;").unwrap(),
        ];
        let (store, _) = RatingStore::from_records(&records);
        let builder = PairwiseSimilarityBuilder::new();
        let registry = SimilarityRegistry::new(store.user_count(), store.movie_count());
        for movie in store.movies().names() {
            let matrix = builder
                .build(movie, store.movie_ratings(movie), store.users())
                .unwrap();
            registry.register(movie, matrix).unwrap();
        }
        let global = registry.aggregate().unwrap();
        assert_eq!(global.row(0), &[0.0, 16.0, 12.0, 11.0, 11.0]);

        // Neighbours B (16) and C (12); scores 84, 128, 68, 124, 12; average 83.2
        let rec = Recommender::new()
            .with_neighbor_count(2)
            .recommend(&store, &global, 0)
            .unwrap();
        assert_eq!(rec.neighbors, vec!["B".to_string(), "C".to_string()]);
        assert_eq!(rec.to_output_record(), "A\tM4[124.00]; M1[84.00]; ");
    }

    #[test]
    fn test_unknown_target() {
        let (store, global) = scenario();
        assert!(Recommender::new().recommend(&store, &global, 9).is_err());
    }
}
