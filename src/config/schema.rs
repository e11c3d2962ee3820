use std::path::PathBuf;

use serde::Deserialize;

use crate::player::DEFAULT_SEEK_TOLERANCE_SECS;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/excerpt/config.toml`
/// or `~/.config/excerpt/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `EXCERPT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub widget: WidgetSourceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// How often the audio thread reports position while playing (milliseconds).
    pub tick_ms: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Allowed drift from the window start before the player re-seeks (seconds).
    pub seek_tolerance_secs: f64,
    /// Start playing the first track as soon as it is ready.
    pub autoplay_first_track: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            seek_tolerance_secs: DEFAULT_SEEK_TOLERANCE_SECS,
            autoplay_first_track: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered under the profile name in the header box.
    pub header_text: String,
    /// Whether the now-playing box shows the cover image path.
    pub show_cover_path: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ now playing ~ ".to_string(),
            show_cover_path: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetSourceSettings {
    /// JSON document with the profile and track list.
    /// A path given on the command line takes precedence.
    pub settings_path: PathBuf,
}

impl Default for WidgetSourceSettings {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from("settings/settings.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. "info" or "excerpt=debug".
    /// `EXCERPT_LOG` overrides it.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/excerpt/excerpt.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
