//! Benchsum - benchmark log summarizer
//!
//! A CLI tool that reads a benchmark results log and reports the count
//! of valid measurements plus their harmonic mean.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable file, strict-mode parse failure,
//!       no valid measurements)

mod aggregator;
mod cli;
mod models;
mod report;

use aggregator::AggregateError;
use anyhow::Result;
use chrono::Utc;
use cli::{Args, OutputFormat};
use models::{ReportMetadata, RunSummary};
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args) {
        error!("Summarization failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the summarizer over the input file and print the result to stdout.
fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    info!("Summarizing {}", args.file.display());
    let stats = match aggregator::aggregate_file(&args.file, args.strict) {
        Ok(stats) => stats,
        Err(e) => {
            // A strict-mode failure still emits the diagnostics collected
            // up to the fatal token, in input order.
            if args.format == OutputFormat::Text {
                if let AggregateError::MalformedMeasurement { ref illegal, .. } = e {
                    for line in illegal {
                        println!("{}", line.diagnostic());
                    }
                }
            }
            return Err(e.into());
        }
    };
    debug!(
        accepted = stats.accepted,
        skipped = stats.skipped,
        illegal = stats.illegal.len(),
        "pass complete"
    );

    match args.format {
        OutputFormat::Text => {
            // Diagnostics come out before the summary (or the failure),
            // in input order.
            let (output, failure) = report::text_output(&stats);
            print!("{}", output);
            if let Some(e) = failure {
                return Err(e.into());
            }
        }
        OutputFormat::Json => {
            let metadata = ReportMetadata {
                input: args.file.display().to_string(),
                generated_at: Utc::now(),
                lines_total: stats.lines_total,
                duration_seconds: start_time.elapsed().as_secs_f64(),
            };
            let summary = RunSummary::from_stats(&stats, metadata)
                .ok_or(AggregateError::NoValidBenchmarks)?;
            println!("{}", report::render_json(&summary)?);
        }
    }

    Ok(())
}
