//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Benchsum - harmonic-mean summarizer for benchmark result logs
///
/// Reads a benchmark log, skips the header line, extracts the measurement
/// from each data line, drops illegal values, and reports the count of
/// accepted measurements together with their harmonic mean.
///
/// Examples:
///   benchsum results.log
///   benchsum results.log --format json
///   benchsum results.log --strict
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the benchmark log file
    ///
    /// Line 0 is treated as a header and never parsed. Existence is not
    /// checked up front; an unreadable file is a fatal error.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format for the summary (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Abort on a malformed measurement token instead of skipping it
    ///
    /// By default a token that is not a float literal is reported and
    /// ignored like an illegal value.
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text diagnostics and summary line (default)
    #[default]
    Text,
    /// JSON document with metadata and per-line verdicts
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
