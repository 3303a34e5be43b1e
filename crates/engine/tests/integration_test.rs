//! End-to-end runs through the engine.

use engine::{JobContext, PipelineRunner, RunConfig};
use data_loader::parse_record;
use engine::stages::{combine, map, shuffle};
use similarity::{PairwiseSimilarityBuilder, SimilarityMatrix};
use std::io::Write as _;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn sample_lines() -> Vec<String> {
    lines(&[
        "u1\tm1$4.5;m2$0.0;m3$3.0;m4$0.0;m5$1.0;m6$0.0;",
        "u2\tm1$4.0;m2$2.5;m3$3.5;m4$5.0;m5$0.0;m6$1.0;",
        "u3\tm1$1.0;m2$5.0;m3$0.0;m4$2.0;m5$4.5;m6$3.0;",
        "u4\tm1$4.5;m2$1.0;m3$3.0;m4$4.0;m5$1.5;m6$0.0;",
        "u5\tm1$0.0;m2$4.0;m3$1.0;m4$0.0;m5$5.0;m6$4.5;",
        "u6\tm1$3.5;m2$0.0;m3$2.5;m4$3.5;m5$0.0;m6$2.0;",
        "u7\tm1$2.0;m2$3.0;m3$0.0;m4$1.0;m5$3.5;m6$5.0;",
        "u8\tm1$5.0;m2$1.5;m3$4.0;m4$4.5;m5$1.0;m6$0.0;",
    ])
}

#[test]
fn test_global_is_sum_of_movie_matrices() {
    let ctx = JobContext::new();
    let mapped = map::run(&ctx, &sample_lines());
    let groups = shuffle::run(&ctx, mapped.emitted).unwrap();
    combine::run(&ctx, &groups).unwrap();

    let registry = ctx.registry().unwrap();
    let mut expected = vec![vec![0.0; 8]; 8];
    for group in &groups {
        let matrix = registry.matrix(&group.movie).unwrap();
        assert!(matrix.diagonal_is_zero());
        for (i, row) in expected.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell += matrix.get(i, j);
            }
        }
    }
    let expected = SimilarityMatrix::from_rows(expected).unwrap();

    let global = ctx.global_similarity().unwrap();
    assert_eq!(global.matrix(), &expected);
    assert!(global.matrix().is_symmetric());

    // Aggregating again from the registry gives the same matrix
    assert_eq!(&registry.aggregate().unwrap(), global);
}

#[test]
fn test_per_movie_contribution() {
    assert_eq!(PairwiseSimilarityBuilder::contribution(4.5, 1.0), 1.5);
    assert_eq!(PairwiseSimilarityBuilder::contribution(3.0, 3.0), 5.0);
}

#[test]
fn test_no_rated_movie_is_recommended() {
    let report = PipelineRunner::new().run_lines(&sample_lines()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.recommendations.len(), 8);

    let records: Vec<_> = sample_lines()
        .iter()
        .enumerate()
        .map(|(i, line)| parse_record(i + 1, line).unwrap())
        .collect();

    for (rec, record) in report.recommendations.iter().zip(&records) {
        assert_eq!(rec.user, record.user);
        for item in &rec.movies {
            let own = record.ratings.iter().find(|r| r.movie == item.movie).unwrap();
            assert_eq!(own.score, 0.0, "{} got {}", rec.user, item.movie);
        }
    }
}

#[test]
fn test_bad_records_are_reported_not_fatal() {
    let mut input = sample_lines();
    input.insert(2, "broken line without tab".to_string());
    input.push("u9\tm1$7.0;".to_string());

    let report = PipelineRunner::new().run_lines(&input).unwrap();
    assert_eq!(report.skipped_records.len(), 2);
    assert!(report.skipped_movies.is_empty());
    assert_eq!(report.recommendations.len(), 8);
}

#[test]
fn test_incomplete_movie_is_skipped_and_run_continues() {
    let mut input = sample_lines();
    input[0] = "u1\tm1$4.5;m2$0.0;m3$3.0;m4$0.0;m5$1.0;m6$0.0;m7$2.0;".to_string();

    let report = PipelineRunner::with_config(RunConfig::default().with_neighbor_count(2))
        .run_lines(&input)
        .unwrap();
    assert_eq!(report.skipped_movies.len(), 1);
    assert_eq!(report.skipped_movies[0].0, "m7");
    assert!(report.failed_users.is_empty());
    assert_eq!(report.recommendations.len(), 8);
}

#[test]
fn test_run_file() {
    let path = std::env::temp_dir().join("engine_integration_ratings.txt");
    {
        let mut file = std::fs::File::create(&path).unwrap();
        for line in sample_lines() {
            writeln!(file, "{}\r", line).unwrap();
        }
    }

    let from_file = PipelineRunner::new().run_file(&path).unwrap();
    let from_memory = PipelineRunner::new().run_lines(&sample_lines()).unwrap();
    assert_eq!(from_file.output_records(), from_memory.output_records());

    std::fs::remove_file(&path).ok();
}
