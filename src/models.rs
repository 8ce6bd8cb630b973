//! Data models for the benchmark summarizer.
//!
//! This module contains the core data structures used throughout
//! the application for representing rejected lines, accumulator
//! state, and the final run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a data line was rejected from aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IllegalReason {
    /// The measurement parsed to positive/negative infinity or NaN.
    NotFinite,
    /// The measurement parsed to exactly zero, which has no reciprocal.
    Zero,
    /// The measurement token is not a float literal (lenient mode only).
    Unparseable,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::NotFinite => write!(f, "not finite"),
            IllegalReason::Zero => write!(f, "zero"),
            IllegalReason::Unparseable => write!(f, "unparseable"),
        }
    }
}

/// A rejected data line, kept for diagnostics and the JSON summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IllegalLine {
    /// 1-based line number in the input file (the header is line 1).
    pub line_no: usize,
    /// Line text with the trailing newline stripped.
    pub text: String,
    /// Why the line was rejected.
    pub reason: IllegalReason,
}

impl IllegalLine {
    /// Format the diagnostic exactly as it is emitted on stdout.
    pub fn diagnostic(&self) -> String {
        format!("[{}] isn't legal, ignore it", self.text)
    }
}

/// Accumulator state produced by a single pass over the input.
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    /// Number of accepted measurements.
    pub accepted: usize,
    /// Sum of reciprocals of accepted measurements, in line order.
    pub reciprocal_sum: f64,
    /// Data lines with at most one token, skipped without a diagnostic.
    pub skipped: usize,
    /// Number of data lines seen (header excluded).
    pub lines_total: usize,
    /// Rejected lines, in line order.
    pub illegal: Vec<IllegalLine>,
}

impl RunStats {
    /// Harmonic mean of the accepted measurements: `accepted / reciprocal_sum`.
    ///
    /// Returns `None` when nothing was accepted; the caller decides how to
    /// surface that (the CLI treats it as fatal).
    pub fn average(&self) -> Option<f64> {
        if self.accepted == 0 {
            None
        } else {
            Some(self.accepted as f64 / self.reciprocal_sum)
        }
    }
}

/// Metadata about a summarizer run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the summarized log file.
    pub input: String,
    /// Date and time the summary was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of data lines in the input (header excluded).
    pub lines_total: usize,
    /// Duration of the pass in seconds.
    pub duration_seconds: f64,
}

/// The complete serializable result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Number of accepted measurements.
    pub accepted: usize,
    /// Harmonic mean of the accepted measurements.
    pub average: f64,
    /// Data lines skipped for having no measurement token.
    pub skipped: usize,
    /// Rejected lines, in line order.
    pub illegal: Vec<IllegalLine>,
}

impl RunSummary {
    /// Build a summary from accumulator state.
    ///
    /// Returns `None` when no measurement was accepted, since no average
    /// exists in that case.
    pub fn from_stats(stats: &RunStats, metadata: ReportMetadata) -> Option<Self> {
        let average = stats.average()?;
        Some(Self {
            metadata,
            accepted: stats.accepted,
            average,
            skipped: stats.skipped,
            illegal: stats.illegal.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_stats() -> RunStats {
        RunStats {
            accepted: 2,
            reciprocal_sum: 0.75,
            skipped: 1,
            lines_total: 4,
            illegal: vec![IllegalLine {
                line_no: 3,
                text: "bench2 ok inf ns".to_string(),
                reason: IllegalReason::NotFinite,
            }],
        }
    }

    #[test]
    fn test_diagnostic_format() {
        let line = IllegalLine {
            line_no: 2,
            text: "vec_new 1000 0.0 ns".to_string(),
            reason: IllegalReason::Zero,
        };
        assert_eq!(
            line.diagnostic(),
            "[vec_new 1000 0.0 ns] isn't legal, ignore it"
        );
    }

    #[test]
    fn test_average_is_harmonic_mean() {
        let stats = make_stats();
        // counter / sum of reciprocals, not the other way around
        assert_eq!(stats.average(), Some(2.0 / 0.75));
    }

    #[test]
    fn test_average_none_when_nothing_accepted() {
        let stats = RunStats::default();
        assert_eq!(stats.average(), None);
    }

    #[test]
    fn test_summary_from_stats() {
        let stats = make_stats();
        let metadata = ReportMetadata {
            input: "bench.log".to_string(),
            generated_at: Utc::now(),
            lines_total: stats.lines_total,
            duration_seconds: 0.01,
        };
        let summary = RunSummary::from_stats(&stats, metadata).unwrap();
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.average, 2.0 / 0.75);
        assert_eq!(summary.illegal.len(), 1);
    }

    #[test]
    fn test_summary_requires_accepted_measurements() {
        let metadata = ReportMetadata {
            input: "bench.log".to_string(),
            generated_at: Utc::now(),
            lines_total: 0,
            duration_seconds: 0.0,
        };
        assert!(RunSummary::from_stats(&RunStats::default(), metadata).is_none());
    }
}
