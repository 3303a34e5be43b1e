//! Parser for rating records.
//!
//! One record per line:
//!
//! ```text
//! <user>\t<movie1>$<score1>;<movie2>$<score2>;...;
//! ```
//!
//! Empty tokens (the trailing `;`) are ignored and a trailing `\r` is
//! tolerated. Every other deviation yields a record-level error that the
//! caller reports and skips.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const FIELD_SEPARATOR: char = '\t';
const TOKEN_SEPARATOR: char = ';';
const SCORE_SEPARATOR: char = '$';

/// Records parsed from a source, along with the lines that were rejected
#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub records: Vec<RatingRecord>,
    pub rejected: Vec<DataLoadError>,
}

/// Read every line of an input file
///
/// A missing file is reported as `FileNotFound`; this is fatal for the load.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let content = String::from_utf8_lossy(&bytes);
    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse a single record line
///
/// `line_no` is 1-based and only used for error context.
pub fn parse_record(line_no: usize, line: &str) -> Result<RatingRecord> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (user, list) = line
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| DataLoadError::ParseError {
            line: line_no,
            reason: "Missing tab between user and rating list".to_string(),
        })?;

    let user = user.trim();
    if user.is_empty() {
        return Err(DataLoadError::ParseError {
            line: line_no,
            reason: "Missing user name".to_string(),
        });
    }

    let mut ratings = Vec::new();
    let mut seen = HashSet::new();
    for token in list.trim().split(TOKEN_SEPARATOR) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let rating = parse_movie_rating(line_no, token)?;
        if !seen.insert(rating.movie.clone()) {
            return Err(DataLoadError::ParseError {
                line: line_no,
                reason: format!("Movie '{}' listed twice", rating.movie),
            });
        }
        ratings.push(rating);
    }

    if ratings.is_empty() {
        return Err(DataLoadError::ParseError {
            line: line_no,
            reason: "Empty rating list".to_string(),
        });
    }

    Ok(RatingRecord {
        line: line_no,
        user: user.to_string(),
        ratings,
    })
}

/// Parse one `movie$score` token
fn parse_movie_rating(line_no: usize, token: &str) -> Result<MovieRating> {
    let (movie, score) =
        token
            .split_once(SCORE_SEPARATOR)
            .ok_or_else(|| DataLoadError::ParseError {
                line: line_no,
                reason: format!("Token '{}' has no '{}'", token, SCORE_SEPARATOR),
            })?;

    if movie.is_empty() {
        return Err(DataLoadError::ParseError {
            line: line_no,
            reason: format!("Token '{}' has no movie name", token),
        });
    }

    let score: Score = score.trim().parse().map_err(|e| DataLoadError::ParseError {
        line: line_no,
        reason: format!("Invalid score in '{}': {}", token, e),
    })?;

    if !(UNRATED..=MAX_SCORE).contains(&score) {
        return Err(DataLoadError::InvalidValue {
            field: "score".to_string(),
            value: score.to_string(),
        });
    }

    Ok(MovieRating {
        movie: movie.to_string(),
        score,
    })
}

/// Parse many lines in parallel, keeping input order
///
/// Blank lines are skipped silently; malformed ones land in `rejected`.
pub fn parse_records(lines: &[String]) -> ParsedRecords {
    let results: Vec<Result<RatingRecord>> = lines
        .par_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_record(idx + 1, line))
        .collect();

    let mut parsed = ParsedRecords::default();
    for result in results {
        match result {
            Ok(record) => parsed.records.push(record),
            Err(e) => {
                tracing::warn!("Skipping record: {}", e);
                parsed.rejected.push(e);
            }
        }
    }
    parsed
}
