// timejump - platform/fs.rs
//
// Whole-file reads for analysis. The file handle is released as soon as the
// content is in memory.

use std::io;
use std::path::Path;

/// Read the full content of a file as a string.
///
/// For files with invalid UTF-8, uses lossy conversion so a stray binary
/// byte does not abort the scan of an otherwise readable log.
pub fn read_file_lossy(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read a file into its lines, without line terminators.
pub fn read_lines_lossy(path: &Path) -> io::Result<Vec<String>> {
    let content = read_file_lossy(path)?;
    Ok(split_lines(&content))
}

/// Split on `\n`, `\r\n` and bare `\r`. A trailing terminator does not
/// produce an extra empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    let normalised = content.replace("\r\n", "\n").replace('\r', "\n");
    normalised.lines().map(str::to_owned).collect()
}
