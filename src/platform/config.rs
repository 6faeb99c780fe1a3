// timejump - platform/config.rs
//
// Platform config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for timejump configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/timejump/ or %APPDATA%\timejump\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Path of the default `config.toml`.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Lines of context around each gap.
    pub context_lines: Option<usize>,
    /// Report gaps longer than this many seconds.
    pub max_gap_seconds: Option<f64>,
    /// Suppress gaps whose line contains the known-cause marker.
    pub ignore_known_cause: Option<bool>,
    /// Substring identifying known-cause lines.
    pub known_cause_marker: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub context_lines: usize,
    pub max_gap_seconds: f64,
    pub ignore_known_cause: bool,
    pub known_cause_marker: String,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            context_lines: constants::DEFAULT_CONTEXT_LINES,
            max_gap_seconds: constants::DEFAULT_MAX_GAP_SECONDS,
            ignore_known_cause: false,
            known_cause_marker: constants::DEFAULT_KNOWN_CAUSE_MARKER.to_string(),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the platform config directory.
///
/// Never fails: a missing file yields defaults with no warnings (first run);
/// an unreadable or unparseable file yields defaults plus a warning.
pub fn load_config(paths: &PlatformPaths) -> (AppConfig, Vec<String>) {
    let config_path = paths.config_file();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => (
            AppConfig::default(),
            vec![format!("{e}. Using defaults.")],
        ),
    }
}

/// Load and validate an explicitly requested config file.
///
/// Unlike [`load_config`], a missing or unparseable file is an error.
/// Out-of-range values are still per-field warnings.
pub fn load_config_file(path: &Path) -> Result<(AppConfig, Vec<String>), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Loaded config.toml");
    Ok(validate(raw))
}

/// Validate each field against named constants, accumulating all warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Analysis: context_lines --
    if let Some(lines) = raw.analysis.context_lines {
        if lines <= constants::MAX_CONTEXT_LINES {
            config.context_lines = lines;
        } else {
            warnings.push(format!(
                "[analysis] context_lines = {lines} is out of range (0-{}). Using default ({}).",
                constants::MAX_CONTEXT_LINES,
                constants::DEFAULT_CONTEXT_LINES,
            ));
        }
    }

    // -- Analysis: max_gap_seconds --
    if let Some(secs) = raw.analysis.max_gap_seconds {
        if secs.is_finite() && secs > 0.0 {
            config.max_gap_seconds = secs;
        } else {
            warnings.push(format!(
                "[analysis] max_gap_seconds = {secs} must be greater than 0. Using default ({}).",
                constants::DEFAULT_MAX_GAP_SECONDS,
            ));
        }
    }

    if let Some(ignore) = raw.analysis.ignore_known_cause {
        config.ignore_known_cause = ignore;
    }

    // -- Analysis: known_cause_marker --
    if let Some(marker) = raw.analysis.known_cause_marker {
        if marker.is_empty() {
            warnings.push(format!(
                "[analysis] known_cause_marker is empty. Using default (\"{}\").",
                constants::DEFAULT_KNOWN_CAUSE_MARKER,
            ));
        } else {
            config.known_cause_marker = marker;
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_empty_config_gives_defaults() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_values_are_applied() {
        let (config, warnings) = parse(
            r#"
[analysis]
context_lines = 5
max_gap_seconds = 2.5
ignore_known_cause = true
known_cause_marker = "Full GC"

[logging]
level = "debug"
"#,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.context_lines, 5);
        assert_eq!(config.max_gap_seconds, 2.5);
        assert!(config.ignore_known_cause);
        assert_eq!(config.known_cause_marker, "Full GC");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_per_field() {
        let (config, warnings) = parse(
            r#"
[analysis]
context_lines = 5000
max_gap_seconds = -1.0
known_cause_marker = ""

[logging]
level = "verbose"
"#,
        );
        assert_eq!(warnings.len(), 4);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (config, warnings) = parse(
            r#"
[analysis]
max_gap_seconds = 10.0
colour = "red"

[future_section]
enabled = true
"#,
        );
        assert!(warnings.is_empty());
        assert_eq!(config.max_gap_seconds, 10.0);
    }

    #[test]
    fn test_load_config_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PlatformPaths {
            config_dir: dir.path().to_path_buf(),
        };
        let (config, warnings) = load_config(&paths);
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_bad_toml_warns() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[analysis\nbroken").unwrap();
        let paths = PlatformPaths {
            config_dir: dir.path().to_path_buf(),
        };
        let (config, warnings) = load_config(&paths);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_explicit_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "context_lines = ").unwrap();
        assert!(matches!(
            load_config_file(&broken),
            Err(ConfigError::TomlParse { .. })
        ));
    }
}
