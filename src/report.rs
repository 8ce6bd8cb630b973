//! Summary rendering in text and JSON form.
//!
//! The text form reproduces the classic script output: one diagnostic
//! per rejected line, in input order, then a single summary line. The
//! JSON form carries the full run summary including per-line verdicts.

use crate::aggregator::AggregateError;
use crate::models::{RunStats, RunSummary};
use anyhow::Result;

/// Render the diagnostics block, one line per rejected input line.
pub fn render_diagnostics(stats: &RunStats) -> String {
    let mut output = String::new();
    for line in &stats.illegal {
        output.push_str(&line.diagnostic());
        output.push('\n');
    }
    output
}

/// Format the final summary line.
pub fn summary_line(accepted: usize, average: f64) -> String {
    format!("Total {} benches with average result {}", accepted, average)
}

/// Render the complete text output: diagnostics followed by the summary line.
pub fn render_text(stats: &RunStats, average: f64) -> String {
    let mut output = render_diagnostics(stats);
    output.push_str(&summary_line(stats.accepted, average));
    output.push('\n');
    output
}

/// Render the complete text stream for a finished pass.
///
/// Diagnostics always come first, in input order. When nothing was
/// accepted they are still emitted and the no-valid-benchmarks failure
/// is returned alongside them for the caller to print and exit on.
pub fn text_output(stats: &RunStats) -> (String, Option<AggregateError>) {
    match stats.average() {
        Some(average) => (render_text(stats, average), None),
        None => (
            render_diagnostics(stats),
            Some(AggregateError::NoValidBenchmarks),
        ),
    }
}

/// Render the run summary as pretty-printed JSON.
pub fn render_json(summary: &RunSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::aggregate_lines;
    use crate::models::ReportMetadata;
    use chrono::Utc;

    const SCENARIO: &str = "\
header line
bench1 ok 2.0 ns
bench2 ok inf ns
bench3 ok 4.0 ns
";

    #[test]
    fn test_render_text_scenario() {
        let stats = aggregate_lines(SCENARIO.lines(), false).unwrap();
        let text = render_text(&stats, stats.average().unwrap());
        assert_eq!(
            text,
            "[bench2 ok inf ns] isn't legal, ignore it\n\
             Total 2 benches with average result 2.6666666666666665\n"
        );
    }

    #[test]
    fn test_no_diagnostics_for_clean_input() {
        let stats = aggregate_lines(["h", "a 2.0 ns"], false).unwrap();
        assert_eq!(render_diagnostics(&stats), "");
    }

    #[test]
    fn test_diagnostics_in_line_order() {
        let lines = ["h", "first inf ns", "mid 4.0 ns", "second 0.0 ns"];
        let stats = aggregate_lines(lines, false).unwrap();
        let diagnostics = render_diagnostics(&stats);
        assert_eq!(
            diagnostics,
            "[first inf ns] isn't legal, ignore it\n\
             [second 0.0 ns] isn't legal, ignore it\n"
        );
    }

    #[test]
    fn test_text_output_with_accepted_measurements() {
        let stats = aggregate_lines(SCENARIO.lines(), false).unwrap();
        let (output, failure) = text_output(&stats);
        assert_eq!(
            output,
            "[bench2 ok inf ns] isn't legal, ignore it\n\
             Total 2 benches with average result 2.6666666666666665\n"
        );
        assert!(failure.is_none());
    }

    #[test]
    fn test_text_output_all_lines_illegal() {
        // Diagnostics are still emitted before the fatal failure when
        // every data line is rejected.
        let lines = ["h", "a 0.0 ns", "b nan ns"];
        let stats = aggregate_lines(lines, false).unwrap();
        let (output, failure) = text_output(&stats);
        assert_eq!(
            output,
            "[a 0.0 ns] isn't legal, ignore it\n\
             [b nan ns] isn't legal, ignore it\n"
        );
        assert!(matches!(failure, Some(AggregateError::NoValidBenchmarks)));
    }

    #[test]
    fn test_render_json_fields() {
        let stats = aggregate_lines(SCENARIO.lines(), false).unwrap();
        let metadata = ReportMetadata {
            input: "bench.log".to_string(),
            generated_at: Utc::now(),
            lines_total: stats.lines_total,
            duration_seconds: 0.01,
        };
        let summary = RunSummary::from_stats(&stats, metadata).unwrap();

        let json = render_json(&summary).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["accepted"], 2);
        assert_eq!(value["average"], 2.0 / 0.75);
        assert_eq!(value["illegal"][0]["reason"], "not_finite");
        assert_eq!(value["illegal"][0]["line_no"], 3);
        assert_eq!(value["metadata"]["input"], "bench.log");
        assert_eq!(value["metadata"]["lines_total"], 3);
    }
}
