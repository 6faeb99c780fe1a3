// timejump - app/scan.rs
//
// Scan orchestration. Walks the expanded file list in order, one file at a
// time: print the header, read the file, detect gaps, print each gap.
//
// Per-file read errors are non-fatal: the file is skipped with a warning,
// recorded in the summary, and the scan continues with the next file.
// Errors writing the report itself (e.g. a closed stdout pipe) stop the run.

use crate::core::gaps;
use crate::core::model::{FileReport, GapOptions};
use crate::core::report;
use crate::platform::fs;
use crate::util::error::{Result, TimeJumpError};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Outcome of a whole run across all files.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files that were read and analysed, in processing order.
    pub reports: Vec<FileReport>,

    /// Files that could not be read.
    pub failures: Vec<TimeJumpError>,
}

impl ScanSummary {
    /// Number of reported gaps across all files.
    pub fn total_gaps(&self) -> usize {
        self.reports.iter().map(|r| r.scan.gaps.len()).sum()
    }

    /// Number of suppressed known-cause gaps across all files.
    pub fn total_suppressed(&self) -> usize {
        self.reports.iter().map(|r| r.scan.suppressed).sum()
    }
}

/// Read and analyse one file.
pub fn analyze_file(path: &Path, options: &GapOptions) -> Result<FileReport> {
    let lines = fs::read_lines_lossy(path).map_err(|source| TimeJumpError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;
    let scan = gaps::scan_lines(&lines, options);

    tracing::debug!(
        path = %path.display(),
        lines = scan.total_lines,
        parsed = scan.parsed_lines,
        unparseable = scan.unparseable_lines,
        gaps = scan.gaps.len(),
        suppressed = scan.suppressed,
        "File analysed"
    );

    Ok(FileReport {
        path: path.to_path_buf(),
        scan,
    })
}

/// Analyse `paths` in order, writing the text report to `out`.
///
/// An empty `paths` slice writes nothing and returns an empty summary.
pub fn run_analysis<W: Write>(
    paths: &[PathBuf],
    options: &GapOptions,
    out: &mut W,
) -> Result<ScanSummary> {
    let write_err = |source: std::io::Error| TimeJumpError::Io {
        path: PathBuf::from("<output>"),
        operation: "write report",
        source,
    };
    let mut summary = ScanSummary::default();

    for path in paths {
        report::write_file_header(out, path, options).map_err(write_err)?;

        let file_report = match analyze_file(path, options) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                summary.failures.push(e);
                continue;
            }
        };

        for gap in &file_report.scan.gaps {
            report::write_gap(out, gap).map_err(write_err)?;
        }
        summary.reports.push(file_report);
    }
    out.flush().map_err(write_err)?;

    tracing::info!(
        files = summary.reports.len(),
        failed = summary.failures.len(),
        gaps = summary.total_gaps(),
        suppressed = summary.total_suppressed(),
        "Scan complete"
    );
    Ok(summary)
}
