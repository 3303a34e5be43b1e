use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{FailedUser, PipelineReport, PipelineRunner, RunConfig};
use pipeline::Recommendation;
use reference::{ReferenceEngine, run_session};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// usercf - user-based collaborative filtering
#[derive(Parser)]
#[command(name = "usercf")]
#[command(about = "Recommend movies from users with similar ratings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the batch engine over a file of rating records
    Run {
        /// Input file, one `user<TAB>movie$score;...` record per line
        #[arg(short, long)]
        input: PathBuf,

        /// Write output records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Neighbours per user (defaults to a quarter of all users)
        #[arg(short = 'k', long)]
        neighbors: Option<usize>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive distance-based recommender on the built-in sample
    Reference,
}

/// JSON view of a finished run
#[derive(Serialize)]
struct JsonReport<'a> {
    recommendations: &'a [Recommendation],
    skipped_records: Vec<String>,
    incomplete_store: Option<String>,
    skipped_movies: &'a [(String, String)],
    failed_users: &'a [FailedUser],
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            neighbors,
            json,
        } => handle_run(&input, output.as_deref(), neighbors, json)?,
        Commands::Reference => handle_reference()?,
    }

    Ok(())
}

/// Handle the 'run' command
fn handle_run(input: &Path, output: Option<&Path>, neighbors: Option<usize>, json: bool) -> Result<()> {
    let config = match neighbors {
        Some(k) => RunConfig::default().with_neighbor_count(k),
        None => RunConfig::default(),
    };

    let report = PipelineRunner::with_config(config)
        .run_file(input)
        .context("Pipeline run failed")?;

    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if json {
        write_json(&report, writer)?;
    } else {
        report
            .write_output(writer)
            .context("Failed to write output records")?;
    }

    print_summary(&report);
    Ok(())
}

/// Handle the 'reference' command
fn handle_reference() -> Result<()> {
    let engine = ReferenceEngine::default();
    eprintln!(
        "{} Users: {}",
        "Reference recommender.".bold().blue(),
        engine.table().users().join(", ")
    );
    eprintln!("Enter a user name per line, or `exit` to quit.");

    let stdin = io::stdin();
    let stats = run_session(&engine, stdin.lock(), io::stdout().lock())
        .context("Reference session failed")?;
    eprintln!(
        "{} {} answered, {} not found",
        "✓".green(),
        stats.answered,
        stats.not_found
    );
    Ok(())
}

fn write_json(report: &PipelineReport, mut writer: impl Write) -> Result<()> {
    let skipped_records: Vec<String> = report.skipped_records.iter().map(|e| e.to_string()).collect();
    let json = JsonReport {
        recommendations: &report.recommendations,
        skipped_records,
        incomplete_store: report.incomplete_store.as_ref().map(|e| e.to_string()),
        skipped_movies: &report.skipped_movies,
        failed_users: &report.failed_users,
    };
    serde_json::to_writer_pretty(&mut writer, &json).context("Failed to serialize report")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Human-readable run summary on stderr
fn print_summary(report: &PipelineReport) {
    eprintln!(
        "{} {} users recommended in {:.2?}",
        "✓".green(),
        report.recommendations.len(),
        report.elapsed
    );
    if report.is_clean() {
        return;
    }

    if !report.skipped_records.is_empty() {
        eprintln!("{}", format!("{} records skipped:", report.skipped_records.len()).yellow());
        for error in &report.skipped_records {
            eprintln!("   {}", error);
        }
    }
    if let Some(error) = &report.incomplete_store {
        eprintln!("{} {}", "Incomplete ratings:".yellow(), error);
    }
    if !report.skipped_movies.is_empty() {
        eprintln!("{}", format!("{} movies skipped:", report.skipped_movies.len()).yellow());
        for (movie, reason) in &report.skipped_movies {
            eprintln!("   {}: {}", movie, reason);
        }
    }
    if !report.failed_users.is_empty() {
        eprintln!("{}", format!("{} users failed:", report.failed_users.len()).red());
        for FailedUser { user, reason } in &report.failed_users {
            eprintln!("   {}: {}", user, reason);
        }
    }
}
