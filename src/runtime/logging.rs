use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Environment variable that overrides `logging.level`.
pub const LOG_ENV: &str = "EXCERPT_LOG";

/// Pick the filter directive: a non-blank `EXCERPT_LOG` wins over the config.
pub fn filter_directive(configured: &str, env_override: Option<String>) -> String {
    env_override
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| configured.to_string())
}

pub fn log_file_path(settings: &LoggingSettings) -> Option<PathBuf> {
    settings.file.clone().or_else(config::default_log_path)
}

/// Install the global subscriber writing to the log file.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// Returns the log file in use, or `None` when no location could be derived.
pub fn init(settings: &LoggingSettings) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let Some(path) = log_file_path(settings) else {
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let directive = filter_directive(&settings.level, std::env::var(LOG_ENV).ok());
    let filter = EnvFilter::try_new(&directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    Ok(Some(path))
}
