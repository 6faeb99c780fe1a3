// timejump - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.

use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::NaiveDateTime;
use std::path::PathBuf;

// =============================================================================
// Analysis options
// =============================================================================

/// Validated settings for one analysis run.
///
/// Built once from CLI arguments merged over `config.toml` and shared by
/// every file's session.
#[derive(Debug, Clone, PartialEq)]
pub struct GapOptions {
    /// Lines printed before the triggering line, and after it.
    pub context_lines: usize,

    /// Gaps strictly longer than this many seconds are reportable.
    pub max_gap_seconds: f64,

    /// Suppress reportable gaps whose line contains `known_cause_marker`.
    pub ignore_known_cause: bool,

    /// Substring identifying gaps with a known, expected cause.
    pub known_cause_marker: String,

    /// Threshold was given on the command line rather than defaulted.
    /// Only changes how the header prints it (`30.0` instead of `30`).
    pub threshold_explicit: bool,
}

impl Default for GapOptions {
    fn default() -> Self {
        Self {
            context_lines: constants::DEFAULT_CONTEXT_LINES,
            max_gap_seconds: constants::DEFAULT_MAX_GAP_SECONDS,
            ignore_known_cause: false,
            known_cause_marker: constants::DEFAULT_KNOWN_CAUSE_MARKER.to_string(),
            threshold_explicit: false,
        }
    }
}

impl GapOptions {
    /// Build options, rejecting values the analyzer cannot work with.
    ///
    /// The threshold must be positive and finite, otherwise every gap (or
    /// none) would be reported. An empty marker would match every line.
    pub fn new(
        context_lines: usize,
        max_gap_seconds: f64,
        ignore_known_cause: bool,
        known_cause_marker: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if context_lines > constants::MAX_CONTEXT_LINES {
            return Err(ConfigError::ValueOutOfRange {
                field: "context_lines".to_string(),
                value: context_lines.to_string(),
                expected: format!("0-{}", constants::MAX_CONTEXT_LINES),
            });
        }
        if !max_gap_seconds.is_finite() || max_gap_seconds <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                field: "max_gap_seconds".to_string(),
                value: max_gap_seconds.to_string(),
                expected: "a finite number of seconds greater than 0".to_string(),
            });
        }
        let known_cause_marker = known_cause_marker.into();
        if known_cause_marker.is_empty() {
            return Err(ConfigError::ValueOutOfRange {
                field: "known_cause_marker".to_string(),
                value: String::new(),
                expected: "a non-empty substring".to_string(),
            });
        }
        Ok(Self {
            context_lines,
            max_gap_seconds,
            ignore_known_cause,
            known_cause_marker,
            threshold_explicit: false,
        })
    }

    /// Mark the threshold as user-supplied.
    pub fn with_explicit_threshold(mut self, explicit: bool) -> Self {
        self.threshold_explicit = explicit;
        self
    }

    /// True when `line` should not be reported because of its known cause.
    pub fn is_known_cause(&self, line: &str) -> bool {
        self.ignore_known_cause && line.contains(self.known_cause_marker.as_str())
    }
}

// =============================================================================
// Gaps
// =============================================================================

/// A reported gap between two consecutive parsed lines of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Gap {
    /// 1-based line number of the line that closed the gap.
    pub line_number: usize,

    /// 1-based line number of the previous parsed line.
    pub previous_line_number: usize,

    /// Timestamp of the previous parsed line.
    pub previous_timestamp: NaiveDateTime,

    /// Timestamp of the line that closed the gap.
    pub timestamp: NaiveDateTime,

    /// Gap length in seconds (millisecond resolution).
    pub seconds: f64,

    /// Stripped text of the line that closed the gap.
    pub line: String,

    /// Stripped lines immediately before `line`, oldest first.
    pub context_before: Vec<String>,

    /// `line` itself followed by the stripped lines after it.
    pub context_after: Vec<String>,
}

/// Outcome of scanning one file's lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    /// Reported gaps in line order.
    pub gaps: Vec<Gap>,

    /// Reportable gaps that were suppressed by the known-cause marker.
    pub suppressed: usize,

    /// Lines whose timestamp prefix parsed.
    pub parsed_lines: usize,

    /// Non-blank lines without a valid timestamp prefix.
    pub unparseable_lines: usize,

    /// Whitespace-only lines.
    pub blank_lines: usize,

    /// All lines in the file.
    pub total_lines: usize,
}

/// Scan result for one analysed file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub scan: ScanResult,
}
