// timejump - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "timejump";

/// Application identifier used for the platform config directory.
pub const APP_ID: &str = "timejump";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Timestamp prefix
// =============================================================================

/// Width in characters of the `YYYY-MM-DD HH:MM:SS.mmm` prefix.
pub const TIMESTAMP_PREFIX_LEN: usize = 23;

/// chrono format string for the timestamp prefix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

// =============================================================================
// Analysis defaults
// =============================================================================

/// Lines of context printed before and after a reported gap.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Upper bound on configurable context lines.
pub const MAX_CONTEXT_LINES: usize = 1_000;

/// Gaps strictly longer than this many seconds are reported.
pub const DEFAULT_MAX_GAP_SECONDS: f64 = 30.0;

/// Substring identifying gaps caused by LMDB map-size growth.
pub const DEFAULT_KNOWN_CAUSE_MARKER: &str = "LMDB Mapsize increased";

/// Notice printed under the file header when the default marker is ignored.
pub const KNOWN_CAUSE_NOTICE: &str = "Ignoring LMDB Mapsize increase events";

/// Maximum number of `=` characters in a gap bar.
pub const GAP_BAR_MAX_WIDTH: usize = 80;

/// Character used to draw the gap bar.
pub const GAP_BAR_CHAR: char = '=';

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Reports go to stdout; diagnostics stay quiet unless asked.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
