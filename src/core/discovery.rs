// timejump - core/discovery.rs
//
// Expansion of the user's file pattern into an ordered list of log files.
//
// Reads only directory metadata, never file contents. Unreadable glob
// entries are non-fatal and logged; an invalid pattern or an empty result
// is returned as an error for the binary to report.

use crate::util::error::DiscoveryError;
use std::path::PathBuf;

/// Expand `pattern` into the files it matches, in glob (sorted) order.
///
/// Directories that match the pattern are skipped.
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let entries = glob::glob(pattern).map_err(|source| DiscoveryError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Skipping non-file match");
            }
            Err(e) => {
                tracing::warn!(
                    path = %e.path().display(),
                    error = %e.error(),
                    "Cannot access pattern match, skipping"
                );
            }
        }
    }

    if files.is_empty() {
        return Err(DiscoveryError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    tracing::info!(pattern, files = files.len(), "Pattern expanded");
    Ok(files)
}
