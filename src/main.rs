// timejump - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. File pattern expansion
// 4. Gap analysis, report output, optional export, exit status

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use timejump::app::scan;
use timejump::core::discovery;
use timejump::core::export;
use timejump::core::model::GapOptions;
use timejump::platform::config::{self, AppConfig, PlatformPaths};
use timejump::util;
use timejump::util::error::DiscoveryError;

/// timejump - find time gaps in log files.
///
/// Reports every place where consecutive timestamped lines
/// (`YYYY-MM-DD HH:MM:SS.mmm ...`) are further apart than a threshold.
#[derive(Parser, Debug)]
#[command(name = "timejump", version, about)]
struct Cli {
    /// File pattern (e.g. "logfile*" or "logs/*.log").
    pattern: String,

    /// Number of lines to show before and after each gap [default: 2].
    context_lines: Option<usize>,

    /// Minimum time gap to report, in seconds [default: 30].
    min_gap_seconds: Option<f64>,

    /// Ignore gaps caused by LMDB Mapsize increases.
    #[arg(long = "ignore-lmdb", alias = "ignore_LMDB", overrides_with = "no_ignore_lmdb")]
    ignore_lmdb: bool,

    /// Report LMDB Mapsize gaps even if config.toml ignores them.
    #[arg(long = "no-ignore-lmdb", overrides_with = "ignore_lmdb")]
    no_ignore_lmdb: bool,

    /// Substring marking lines whose gaps --ignore-lmdb suppresses.
    #[arg(short = 'm', long = "marker")]
    marker: Option<String>,

    /// Also write reported gaps to a .csv or .json file.
    #[arg(short = 'e', long = "export")]
    export: Option<PathBuf>,

    /// Read settings from this config.toml instead of the platform default.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is loaded before logging so [logging] level can take effect;
    // its warnings are replayed once the subscriber is installed.
    let (app_config, config_warnings) = match cli.config.as_deref() {
        Some(path) => match config::load_config_file(path) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => config::load_config(&PlatformPaths::resolve()),
    };

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "timejump starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config validation warning");
    }

    let options = match merge_options(&cli, app_config) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let files = match discovery::expand_pattern(&cli.pattern) {
        Ok(files) => files,
        Err(e @ DiscoveryError::NoMatches { .. }) => {
            println!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let summary = match scan::run_analysis(&files, &options, &mut stdout.lock()) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "Analysis aborted");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut status = ExitCode::SUCCESS;

    if let Some(ref export_path) = cli.export {
        if let Err(e) = export::export_to_path(&summary.reports, export_path) {
            tracing::error!(error = %e, "Export failed");
            eprintln!("Error: {e}");
            status = ExitCode::FAILURE;
        }
    }

    if !summary.failures.is_empty() {
        for failure in &summary.failures {
            eprintln!("Error: {failure}");
        }
        status = ExitCode::FAILURE;
    }

    status
}

/// Apply CLI overrides on top of config.toml values, then validate.
///
/// Priority: CLI argument > config.toml > built-in default.
fn merge_options(
    cli: &Cli,
    app_config: AppConfig,
) -> Result<GapOptions, util::error::ConfigError> {
    let ignore_known_cause = match (cli.ignore_lmdb, cli.no_ignore_lmdb) {
        (true, _) => true,
        (_, true) => false,
        _ => app_config.ignore_known_cause,
    };
    GapOptions::new(
        cli.context_lines.unwrap_or(app_config.context_lines),
        cli.min_gap_seconds.unwrap_or(app_config.max_gap_seconds),
        ignore_known_cause,
        cli.marker
            .clone()
            .unwrap_or(app_config.known_cause_marker),
    )
    .map(|options| options.with_explicit_threshold(cli.min_gap_seconds.is_some()))
}
