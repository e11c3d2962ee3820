use std::path::PathBuf;

use crate::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("excerpt: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("excerpt: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// The widget settings document: first CLI argument, else the configured path.
pub fn widget_settings_path(
    cli_arg: Option<String>,
    widget: &config::WidgetSourceSettings,
) -> PathBuf {
    cli_arg
        .filter(|a| !a.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| widget.settings_path.clone())
}
