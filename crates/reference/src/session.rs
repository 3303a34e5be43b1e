//! Line-oriented interactive session.
//!
//! Reads one user name per line and answers each with a recommendation
//! line. `exit` or end of input ends the session.

use crate::engine::ReferenceEngine;
use crate::error::{ReferenceError, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

const EXIT_COMMAND: &str = "exit";
const LIST_PREFIX: &str = "推荐电影列表：";
const NOT_FOUND: &str = "没有搜索到此用户，请重新输入：";

/// Counts for one finished session
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub not_found: usize,
}

/// Answer queries from `input` on `output` until `exit` or end of input
pub fn run_session<R: BufRead, W: Write>(
    engine: &ReferenceEngine,
    input: R,
    mut output: W,
) -> Result<SessionStats> {
    let mut stats = SessionStats::default();

    for line in input.lines() {
        let line = line?;
        let name = line.trim_end_matches('\r');
        if name == EXIT_COMMAND {
            break;
        }

        match engine.recommend(name) {
            Ok(movies) => {
                let mut answer = String::from(LIST_PREFIX);
                for movie in &movies {
                    answer.push_str(movie);
                    answer.push_str("  ");
                }
                writeln!(output, "{}", answer)?;
                stats.answered += 1;
            }
            Err(ReferenceError::UnknownUser(name)) => {
                warn!("Unknown user '{}'", name);
                writeln!(output, "{}", NOT_FOUND)?;
                stats.not_found += 1;
            }
            Err(e) => return Err(e),
        }
        output.flush()?;
    }

    info!(
        "Session ended: {} answered, {} not found",
        stats.answered, stats.not_found
    );
    Ok(stats)
}
