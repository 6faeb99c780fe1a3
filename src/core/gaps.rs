// timejump - core/gaps.rs
//
// Gap detection: a single linear pass over one file's lines.
//
// Invariants:
//   - Lines are observed in file order.
//   - Only lines whose timestamp prefix parses move the session baseline,
//     whether or not a gap was reported for them.
//   - Gaps are measured from the most recent parsed line, never from the
//     most recent reported line.

use crate::core::model::{Gap, GapOptions, ScanResult};
use crate::core::timestamp::{parse_line_timestamp, seconds_between};
use crate::util::constants;
use chrono::NaiveDateTime;

/// Details of a threshold-exceeding gap, before context is attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GapEvent {
    pub seconds: f64,
    pub previous_index: usize,
    pub previous_timestamp: NaiveDateTime,
    pub timestamp: NaiveDateTime,
}

/// What the session concluded about a single line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Observation {
    /// Whitespace-only line. State untouched.
    Blank,
    /// No valid timestamp prefix. State untouched.
    Unparseable,
    /// First parsed line of the file; becomes the baseline.
    Baseline,
    /// Parsed, gap within the threshold (or negative).
    Within { seconds: f64 },
    /// Parsed, gap above the threshold. Should be reported.
    Reportable(GapEvent),
    /// Parsed, gap above the threshold, but the line carries the known-cause
    /// marker and suppression is on.
    Suppressed(GapEvent),
}

/// Per-file detection state.
///
/// Holds the last parsed timestamp and the index of the line it came from.
/// Create one per file; nothing carries across files.
#[derive(Debug)]
pub struct AnalysisSession<'a> {
    options: &'a GapOptions,
    previous: Option<(NaiveDateTime, usize)>,
}

impl<'a> AnalysisSession<'a> {
    pub fn new(options: &'a GapOptions) -> Self {
        Self {
            options,
            previous: None,
        }
    }

    /// Index of the most recent parsed line, if any.
    pub fn previous_index(&self) -> Option<usize> {
        self.previous.map(|(_, index)| index)
    }

    /// Timestamp of the most recent parsed line, if any.
    pub fn previous_timestamp(&self) -> Option<NaiveDateTime> {
        self.previous.map(|(timestamp, _)| timestamp)
    }

    /// Feed the line at `index` into the session.
    pub fn observe(&mut self, index: usize, line: &str) -> Observation {
        if line.trim().is_empty() {
            return Observation::Blank;
        }
        let Some(timestamp) = parse_line_timestamp(line) else {
            return Observation::Unparseable;
        };

        let previous = self.previous.replace((timestamp, index));
        let Some((previous_timestamp, previous_index)) = previous else {
            return Observation::Baseline;
        };

        let seconds = seconds_between(previous_timestamp, timestamp);
        if seconds <= self.options.max_gap_seconds {
            return Observation::Within { seconds };
        }

        let event = GapEvent {
            seconds,
            previous_index,
            previous_timestamp,
            timestamp,
        };
        if self.options.is_known_cause(line) {
            Observation::Suppressed(event)
        } else {
            Observation::Reportable(event)
        }
    }
}

/// Scan a whole file's lines and collect every reportable gap.
///
/// Context before a gap is at most `context_lines` lines; context after
/// starts at the triggering line and adds at most `context_lines` more.
/// Both are clipped at the file boundaries and stripped of surrounding
/// whitespace.
pub fn scan_lines<S: AsRef<str>>(lines: &[S], options: &GapOptions) -> ScanResult {
    let mut session = AnalysisSession::new(options);
    let mut result = ScanResult {
        total_lines: lines.len(),
        ..ScanResult::default()
    };

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match session.observe(index, line) {
            Observation::Blank => result.blank_lines += 1,
            Observation::Unparseable => result.unparseable_lines += 1,
            Observation::Baseline | Observation::Within { .. } => result.parsed_lines += 1,
            Observation::Suppressed(event) => {
                result.parsed_lines += 1;
                result.suppressed += 1;
                tracing::debug!(
                    line_number = index + 1,
                    seconds = event.seconds,
                    line = %preview(line),
                    "Suppressed known-cause gap"
                );
            }
            Observation::Reportable(event) => {
                result.parsed_lines += 1;
                result
                    .gaps
                    .push(build_gap(lines, index, event, options.context_lines));
            }
        }
    }

    result
}

fn build_gap<S: AsRef<str>>(lines: &[S], index: usize, event: GapEvent, context: usize) -> Gap {
    let before_start = index.saturating_sub(context);
    let after_end = index.saturating_add(context).saturating_add(1).min(lines.len());
    let stripped = |range: &[S]| -> Vec<String> {
        range.iter().map(|l| l.as_ref().trim().to_string()).collect()
    };

    Gap {
        line_number: index + 1,
        previous_line_number: event.previous_index + 1,
        previous_timestamp: event.previous_timestamp,
        timestamp: event.timestamp,
        seconds: event.seconds,
        line: lines[index].as_ref().trim().to_string(),
        context_before: stripped(&lines[before_start..index]),
        context_after: stripped(&lines[index..after_end]),
    }
}

/// Truncate a line for debug output.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((cut, _)) => &line[..cut],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(max_gap_seconds: f64) -> GapOptions {
        GapOptions {
            max_gap_seconds,
            ..GapOptions::default()
        }
    }

    fn ignoring() -> GapOptions {
        GapOptions {
            ignore_known_cause: true,
            ..GapOptions::default()
        }
    }

    #[test]
    fn test_single_gap_anchored_at_third_line() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:00:05.000 INFO working",
            "2024-01-15 10:01:00.000 INFO resumed",
        ];
        let result = scan_lines(&lines, &opts(30.0));
        assert_eq!(result.gaps.len(), 1);
        let gap = &result.gaps[0];
        assert_eq!(gap.line_number, 3);
        assert_eq!(gap.previous_line_number, 2);
        assert_eq!(gap.seconds, 55.0);
        assert_eq!(result.parsed_lines, 3);
    }

    #[test]
    fn test_threshold_above_gap_reports_nothing() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:00:05.000 INFO working",
            "2024-01-15 10:01:00.000 INFO resumed",
        ];
        assert!(scan_lines(&lines, &opts(60.0)).gaps.is_empty());
    }

    #[test]
    fn test_gap_equal_to_threshold_is_not_reported() {
        let lines = [
            "2024-01-15 10:00:00.000 a",
            "2024-01-15 10:00:30.000 b",
            "2024-01-15 10:01:00.001 c",
        ];
        let result = scan_lines(&lines, &opts(30.0));
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].line_number, 3);
        assert_eq!(result.gaps[0].seconds, 30.001);
    }

    #[test]
    fn test_malformed_line_does_not_split_gap() {
        let lines = [
            "2024-01-15 10:00:00.000 a",
            "garbage line without timestamp",
            "    at com.example.Worker.run(Worker.java:12)",
            "2024-01-15 10:00:40.000 b",
        ];
        let result = scan_lines(&lines, &opts(30.0));
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].previous_line_number, 1);
        assert_eq!(result.gaps[0].line_number, 4);
        assert_eq!(result.gaps[0].seconds, 40.0);
        assert_eq!(result.unparseable_lines, 2);
    }

    #[test]
    fn test_blank_and_unparseable_lines_leave_state_alone() {
        let options = GapOptions::default();
        let mut session = AnalysisSession::new(&options);
        assert_eq!(session.observe(0, "   \t"), Observation::Blank);
        assert_eq!(session.observe(1, "not a log line"), Observation::Unparseable);
        assert!(session.previous_index().is_none());
        assert!(session.previous_timestamp().is_none());

        assert_eq!(
            session.observe(2, "2024-01-15 10:00:00.000 a"),
            Observation::Baseline
        );
        assert_eq!(session.observe(3, ""), Observation::Blank);
        assert_eq!(session.observe(4, "2024-99-15 10:00:00.000 bad"), Observation::Unparseable);
        assert_eq!(session.previous_index(), Some(2));
        assert_eq!(
            session.previous_timestamp(),
            parse_line_timestamp("2024-01-15 10:00:00.000")
        );
    }

    #[test]
    fn test_known_cause_suppressed_but_becomes_baseline() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:00:05.000 INFO working",
            "2024-01-15 10:01:00.000 INFO LMDB Mapsize increased to 4GB",
            "2024-01-15 10:01:40.000 INFO after",
        ];
        let result = scan_lines(&lines, &ignoring());
        assert_eq!(result.suppressed, 1);
        assert_eq!(result.gaps.len(), 1);
        // Measured from the suppressed line, not from line 2 (95 s).
        assert_eq!(result.gaps[0].previous_line_number, 3);
        assert_eq!(result.gaps[0].seconds, 40.0);
    }

    #[test]
    fn test_known_cause_only_scenario_reports_nothing() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:00:05.000 INFO working",
            "2024-01-15 10:01:00.000 INFO LMDB Mapsize increased",
            "2024-01-15 10:01:10.000 INFO after",
        ];
        let result = scan_lines(&lines, &ignoring());
        assert!(result.gaps.is_empty());
        assert_eq!(result.suppressed, 1);
    }

    #[test]
    fn test_marker_reported_when_suppression_off() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:01:00.000 INFO LMDB Mapsize increased",
        ];
        let result = scan_lines(&lines, &GapOptions::default());
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.suppressed, 0);
    }

    #[test]
    fn test_marker_on_small_gap_is_not_counted() {
        let lines = [
            "2024-01-15 10:00:00.000 INFO start",
            "2024-01-15 10:00:01.000 INFO LMDB Mapsize increased",
        ];
        let result = scan_lines(&lines, &ignoring());
        assert_eq!(result.suppressed, 0);
    }

    #[test]
    fn test_negative_gap_never_reported() {
        let lines = [
            "2024-01-15 10:05:00.000 late",
            "2024-01-15 10:00:00.000 early",
            "2024-01-15 10:00:10.000 next",
        ];
        let result = scan_lines(&lines, &opts(1.0));
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].line_number, 3);
        assert_eq!(result.gaps[0].seconds, 10.0);
    }

    #[test]
    fn test_context_clipped_at_file_start_and_end() {
        let lines = [
            "2024-01-15 10:00:00.000 a",
            "2024-01-15 10:01:00.000 b",
        ];
        let result = scan_lines(&lines, &opts(30.0));
        let gap = &result.gaps[0];
        assert_eq!(gap.context_before, vec!["2024-01-15 10:00:00.000 a"]);
        assert_eq!(gap.context_after, vec!["2024-01-15 10:01:00.000 b"]);
    }

    #[test]
    fn test_context_window_and_stripping() {
        let lines = [
            "2024-01-15 10:00:00.000 one",
            "2024-01-15 10:00:01.000 two",
            "  continuation  ",
            "2024-01-15 10:01:00.000 three\r",
            "2024-01-15 10:01:01.000 four",
            "",
            "2024-01-15 10:01:02.000 five",
        ];
        let result = scan_lines(&lines, &GapOptions::default());
        let gap = &result.gaps[0];
        assert_eq!(
            gap.context_before,
            vec!["2024-01-15 10:00:01.000 two", "continuation"]
        );
        assert_eq!(
            gap.context_after,
            vec![
                "2024-01-15 10:01:00.000 three",
                "2024-01-15 10:01:01.000 four",
                ""
            ]
        );
        assert_eq!(gap.line, "2024-01-15 10:01:00.000 three");
    }

    #[test]
    fn test_zero_context_keeps_only_trigger_line() {
        let lines = [
            "2024-01-15 10:00:00.000 a",
            "2024-01-15 10:01:00.000 b",
            "2024-01-15 10:01:01.000 c",
        ];
        let options = GapOptions {
            context_lines: 0,
            ..GapOptions::default()
        };
        let gap = &scan_lines(&lines, &options).gaps[0];
        assert!(gap.context_before.is_empty());
        assert_eq!(gap.context_after, vec!["2024-01-15 10:01:00.000 b"]);
    }

    #[test]
    fn test_no_parsed_lines_is_not_an_error() {
        let lines = ["hello", "", "world"];
        let result = scan_lines(&lines, &GapOptions::default());
        assert!(result.gaps.is_empty());
        assert_eq!(result.parsed_lines, 0);
        assert_eq!(result.blank_lines, 1);
        assert_eq!(result.unparseable_lines, 2);
        assert_eq!(result.total_lines, 3);

        let empty: [&str; 0] = [];
        assert_eq!(scan_lines(&empty, &GapOptions::default()), ScanResult::default());
    }

    #[test]
    fn test_multiple_gaps_in_line_order() {
        let lines = [
            "2024-01-15 10:00:00.000 a",
            "2024-01-15 10:00:45.000 b",
            "2024-01-15 10:00:50.000 c",
            "2024-01-15 10:02:50.000 d",
        ];
        let result = scan_lines(&lines, &GapOptions::default());
        let numbers: Vec<usize> = result.gaps.iter().map(|g| g.line_number).collect();
        assert_eq!(numbers, vec![2, 4]);
        assert_eq!(result.gaps[1].seconds, 120.0);
    }

    #[test]
    fn test_preview_truncates_long_lines() {
        let long = "x".repeat(constants::DEBUG_MAX_LINE_PREVIEW + 50);
        assert_eq!(preview(&long).len(), constants::DEBUG_MAX_LINE_PREVIEW);
        assert_eq!(preview("short"), "short");
    }
}
