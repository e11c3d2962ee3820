//! Audio-related small types and handles.
//!
//! Commands flow into the audio thread as `AudioCmd`; notifications flow back
//! as `Notification`, tagged with the load generation they belong to.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::player::MediaEvent;

#[derive(Debug)]
pub enum AudioCmd {
    /// Open `path` paused at position zero. `generation` tags every notification
    /// emitted for this load.
    Load { path: PathBuf, generation: u64 },
    /// Start or resume playback of the loaded source.
    Play,
    /// Pause playback.
    Pause,
    /// Seek to an absolute position.
    Seek(Duration),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Media(MediaEvent),
    /// The source ran out of samples.
    Ended,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub generation: u64,
    pub signal: Signal,
}

#[derive(Debug, Clone)]
/// Media state shared between the audio thread and the player side.
pub struct MediaInfo {
    /// Current playback position.
    pub position: Duration,
    /// Total duration of the loaded source, once known.
    pub duration: Option<Duration>,
    /// Whether playback is paused. Only written from the player side.
    pub paused: bool,
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            duration: None,
            paused: true,
        }
    }
}

pub type MediaHandle = Arc<Mutex<MediaInfo>>;
