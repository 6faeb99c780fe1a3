// timejump - core/report.rs
//
// Plain-text rendering of file headers and gap reports.
// Core layer: writes to any Write trait object.

use crate::core::model::{Gap, GapOptions};
use crate::util::constants;
use std::io::{self, Write};
use std::path::Path;

/// Write the per-file header, plus the suppression notice when enabled.
pub fn write_file_header<W: Write>(
    writer: &mut W,
    path: &Path,
    options: &GapOptions,
) -> io::Result<()> {
    writeln!(
        writer,
        "\nAnalyzing {} (looking for gaps > {} seconds):",
        path.display(),
        threshold_label(options)
    )?;
    if options.ignore_known_cause {
        writeln!(writer, "{}", ignore_notice(options))?;
    }
    Ok(())
}

/// Write one "Time gap found" block.
pub fn write_gap<W: Write>(writer: &mut W, gap: &Gap) -> io::Result<()> {
    writeln!(writer, "\nTime gap found:")?;
    for line in &gap.context_before {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{} {:.1} seconds", gap_bar(gap.seconds), gap.seconds)?;
    for line in &gap.context_after {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Bar of `=` one character per whole second, capped at 80.
pub fn gap_bar(seconds: f64) -> String {
    let width = if seconds.is_finite() && seconds > 0.0 {
        (seconds.floor() as usize).min(constants::GAP_BAR_MAX_WIDTH)
    } else {
        0
    };
    std::iter::repeat(constants::GAP_BAR_CHAR)
        .take(width)
        .collect()
}

/// Threshold as shown in the header.
///
/// A whole-number threshold prints bare (`30`) when defaulted and with one
/// decimal (`45.0`) when given explicitly.
pub fn threshold_label(options: &GapOptions) -> String {
    let secs = options.max_gap_seconds;
    if options.threshold_explicit && secs.fract() == 0.0 && secs.abs() < 1e16 {
        format!("{secs:.1}")
    } else {
        format!("{secs}")
    }
}

/// Notice printed when known-cause suppression is on.
pub fn ignore_notice(options: &GapOptions) -> String {
    if options.known_cause_marker == constants::DEFAULT_KNOWN_CAUSE_MARKER {
        constants::KNOWN_CAUSE_NOTICE.to_string()
    } else {
        format!(
            "Ignoring known-cause events containing \"{}\"",
            options.known_cause_marker
        )
    }
}
