// timejump - core/export.rs
//
// CSV and JSON export of reported gaps.
// Core layer: writes to any Write trait object.

use crate::core::model::FileReport;
use crate::util::constants::TIMESTAMP_FORMAT;
use crate::util::error::ExportError;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Output format, chosen from the export path's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(ExportError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// One exported row: a reported gap flattened with its source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapRecord {
    pub file: String,
    pub line: usize,
    pub previous_line: usize,
    pub previous_timestamp: String,
    pub timestamp: String,
    pub gap_seconds: f64,
    pub text: String,
}

/// Flatten every reported gap across `reports`, in file then line order.
pub fn gap_records(reports: &[FileReport]) -> Vec<GapRecord> {
    reports
        .iter()
        .flat_map(|report| {
            let file = report.path.display().to_string();
            report.scan.gaps.iter().map(move |gap| GapRecord {
                file: file.clone(),
                line: gap.line_number,
                previous_line: gap.previous_line_number,
                previous_timestamp: gap.previous_timestamp.format(TIMESTAMP_FORMAT).to_string(),
                timestamp: gap.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                gap_seconds: gap.seconds,
                text: gap.line.clone(),
            })
        })
        .collect()
}

/// Export records to CSV format.
///
/// Writes: file, line, previous_line, previous_timestamp, timestamp, gap_seconds, text
pub fn export_csv<W: Write>(
    records: &[GapRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source,
    };

    csv_writer
        .write_record([
            "file",
            "line",
            "previous_line",
            "previous_timestamp",
            "timestamp",
            "gap_seconds",
            "text",
        ])
        .map_err(csv_err)?;

    for record in records {
        let line = record.line.to_string();
        let previous_line = record.previous_line.to_string();
        let gap_seconds = format!("{:.3}", record.gap_seconds);
        csv_writer
            .write_record([
                record.file.as_str(),
                line.as_str(),
                previous_line.as_str(),
                record.previous_timestamp.as_str(),
                record.timestamp.as_str(),
                gap_seconds.as_str(),
                record.text.as_str(),
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|source| ExportError::Io {
        path: export_path.to_path_buf(),
        source,
    })?;

    Ok(records.len())
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[GapRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|source| ExportError::Json {
        path: export_path.to_path_buf(),
        source,
    })?;
    Ok(records.len())
}

/// Write all reported gaps to `path` in the format its extension names.
///
/// Returns the number of records written.
pub fn export_to_path(reports: &[FileReport], path: &Path) -> Result<usize, ExportError> {
    let format = ExportFormat::from_path(path)?;
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    let records = gap_records(reports);

    let count = match format {
        ExportFormat::Csv => export_csv(&records, &mut writer, path)?,
        ExportFormat::Json => export_json(&records, &mut writer, path)?,
    };
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), records = count, "Gaps exported");
    Ok(count)
}
