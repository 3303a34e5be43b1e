//! Batch engine for user-based collaborative filtering.
//!
//! A run moves rating records through map, shuffle, combine and reduce
//! stages. All shared state for a run lives in one [`JobContext`]; the global
//! similarity matrix inside it is computed once, lazily, and only after every
//! movie group has been accounted for.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{PipelineRunner, RunConfig};
//!
//! let runner = PipelineRunner::with_config(RunConfig::default().with_neighbor_count(2));
//! let report = runner.run_file(Path::new("ratings.txt"))?;
//! report.write_output(std::io::stdout().lock())?;
//! ```

pub mod context;
pub mod stages;
pub mod orchestrator;

pub use context::JobContext;
pub use orchestrator::{PipelineReport, PipelineRunner, RunConfig};
pub use stages::{FailedUser, ReduceKey};
