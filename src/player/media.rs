//! The contract between the segment player and whatever actually plays media.

use std::path::Path;

/// Notifications a media resource emits as its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough of the source is available to seek freely and start playback.
    ReadyToPlay,
    /// The playback position moved.
    TimeAdvanced,
    /// A `play()` request went through and audio is flowing.
    PlaybackStarted,
    /// A `play()` request was refused; carries a human-readable reason.
    PlayRejected(String),
    /// The source ran out of samples; the resource is now paused.
    Ended,
}

/// A single playable media resource.
///
/// `play` and `pause` flip the paused flag immediately. Whether a play request
/// actually succeeded arrives later as `PlaybackStarted` or `PlayRejected`.
pub trait MediaResource {
    /// Bind the resource to a new media file. Takes effect on the next `load`.
    fn set_source(&mut self, path: &Path);
    /// (Re)load the bound source from position zero.
    fn load(&mut self);
    fn play(&mut self);
    fn pause(&mut self);
    /// Current position in seconds.
    fn current_time(&self) -> f64;
    /// Seek to `secs`.
    fn set_current_time(&mut self, secs: f64);
    /// Total duration in seconds, once known.
    fn duration(&self) -> Option<f64>;
    fn is_paused(&self) -> bool;
    /// Next pending notification, in emission order.
    fn poll_event(&mut self) -> Option<MediaEvent>;
}
