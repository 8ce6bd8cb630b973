//! Single-pass aggregation over benchmark log lines.
//!
//! The first line of the input is always treated as a header and skipped.
//! Each remaining line is split on the single space character; the
//! second-to-last token is the measurement. Finite non-zero measurements
//! contribute their reciprocal to the running sum, everything else is
//! rejected with a diagnostic.

use crate::models::{IllegalLine, IllegalReason, RunStats};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that terminate a run.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The input file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode only: a measurement token that is not a float literal.
    ///
    /// Carries the rejected lines collected before the failure so the
    /// caller can still emit their diagnostics, as the original streamed
    /// them before dying.
    #[error("line {line_no}: measurement token {token:?} is not a number")]
    MalformedMeasurement {
        line_no: usize,
        token: String,
        illegal: Vec<IllegalLine>,
    },

    /// Every data line was rejected or skipped; no average exists.
    #[error("no valid benchmark measurements found")]
    NoValidBenchmarks,
}

/// Outcome of examining a single data line.
#[derive(Debug, Clone, PartialEq)]
enum LineVerdict {
    /// At most one token: no measurement present.
    Skipped,
    /// The token at the measurement position is not a float literal.
    Malformed(String),
    /// Parsed, but infinite, NaN, or zero.
    Illegal(IllegalReason),
    /// Finite non-zero measurement.
    Accepted(f64),
}

/// Aggregate a benchmark log file.
///
/// Reads the whole file and folds its lines into [`RunStats`]. The file's
/// existence is not checked up front; open or read failures surface as
/// [`AggregateError::Io`].
pub fn aggregate_file(path: &Path, strict: bool) -> Result<RunStats, AggregateError> {
    let content = std::fs::read_to_string(path).map_err(|source| AggregateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    aggregate_lines(content.lines(), strict)
}

/// Aggregate an in-memory sequence of lines, header included.
///
/// Line 0 is skipped unconditionally, whatever it contains. In strict mode
/// an unparseable measurement token aborts the pass; otherwise it is
/// recorded as [`IllegalReason::Unparseable`] and processing continues.
pub fn aggregate_lines<'a, I>(lines: I, strict: bool) -> Result<RunStats, AggregateError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stats = RunStats::default();

    for (idx, line) in lines.into_iter().enumerate() {
        // Line 0 is the header, never parsed.
        if idx == 0 {
            continue;
        }

        stats.lines_total += 1;
        let line_no = idx + 1;

        match judge_line(line) {
            LineVerdict::Skipped => {
                trace!(line_no, "no measurement token, skipping");
                stats.skipped += 1;
            }
            LineVerdict::Malformed(token) => {
                if strict {
                    return Err(AggregateError::MalformedMeasurement {
                        line_no,
                        token,
                        illegal: stats.illegal,
                    });
                }
                debug!(line_no, %token, "unparseable measurement token");
                stats.illegal.push(IllegalLine {
                    line_no,
                    text: line.to_string(),
                    reason: IllegalReason::Unparseable,
                });
            }
            LineVerdict::Illegal(reason) => {
                debug!(line_no, %reason, "illegal measurement");
                stats.illegal.push(IllegalLine {
                    line_no,
                    text: line.to_string(),
                    reason,
                });
            }
            LineVerdict::Accepted(measurement) => {
                stats.accepted += 1;
                stats.reciprocal_sum += 1.0 / measurement;
            }
        }
    }

    Ok(stats)
}

/// Examine one data line and classify its measurement.
fn judge_line(line: &str) -> LineVerdict {
    // Split on the single space character; empty tokens are preserved so
    // the measurement position matches the original log layout.
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() <= 1 {
        return LineVerdict::Skipped;
    }

    let token = tokens[tokens.len() - 2];
    match token.parse::<f64>() {
        Ok(m) if m.is_infinite() || m.is_nan() => LineVerdict::Illegal(IllegalReason::NotFinite),
        Ok(m) if m == 0.0 => LineVerdict::Illegal(IllegalReason::Zero),
        Ok(m) => LineVerdict::Accepted(m),
        Err(_) => LineVerdict::Malformed(token.to_string()),
    }
}
