//! The reference recommender over data loaded through the batch path.

use data_loader::{RatingStore, parse_record};
use reference::{RatingTable, ReferenceEngine};

const SAMPLE_LINES: [&str; 5] = [
    "小明\t电影1$3;电影2$1;电影3$4;电影4$4;电影5$1;电影6$0;电影7$0;",
    "小花\t电影1$0;电影2$5;电影3$1;电影4$0;电影5$0;电影6$4;电影7$0;",
    "小美\t电影1$1;电影2$0;电影3$5;电影4$4;电影5$3;电影6$5;电影7$2;",
    "小张\t电影1$3;电影2$1;电影3$4;电影4$3;电影5$5;电影6$0;电影7$0;",
    "小李\t电影1$5;电影2$2;电影3$0;电影4$1;电影5$0;电影6$5;电影7$5;",
];

fn sample_store() -> RatingStore {
    let records: Vec<_> = SAMPLE_LINES
        .iter()
        .enumerate()
        .map(|(i, line)| parse_record(i + 1, line).unwrap())
        .collect();
    let (store, rejected) = RatingStore::from_records(&records);
    assert!(rejected.is_empty());
    store
}

#[test]
fn test_store_copy_matches_sample() {
    assert_eq!(RatingTable::from_store(&sample_store()), RatingTable::sample());
}

#[test]
fn test_same_answers_from_store() {
    let from_store = ReferenceEngine::new(RatingTable::from_store(&sample_store()));
    let sample = ReferenceEngine::default();

    for user in RatingTable::sample().users() {
        assert_eq!(
            from_store.recommend(user).unwrap(),
            sample.recommend(user).unwrap(),
            "answers differ for {}",
            user
        );
    }
}

#[test]
fn test_engine_never_suggests_rated_movies_on_sample() {
    let report = engine::PipelineRunner::with_config(engine::RunConfig::default().with_neighbor_count(2))
        .run_lines(&SAMPLE_LINES.iter().map(|s| s.to_string()).collect::<Vec<_>>())
        .unwrap();
    let table = RatingTable::sample();

    for rec in &report.recommendations {
        let row = table.row(table.user_index(&rec.user).unwrap());
        for item in &rec.movies {
            let column = table.movies().iter().position(|m| *m == item.movie).unwrap();
            assert_eq!(row[column], 0.0);
        }
    }
}
