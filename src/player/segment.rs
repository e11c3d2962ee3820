//! The segment-playback state machine.
//!
//! `SegmentPlayer` sequences playlist entries over a single media resource,
//! keeps each entry inside its playback window and auto-advances when the
//! window's end is reached. Every notification from the media resource is a
//! transition input; all mutation goes through the methods below.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::playlist::Track;

use super::media::{MediaEvent, MediaResource};
use super::window::PlaybackWindow;

/// How far the position may drift from the window start before we re-seek.
pub const DEFAULT_SEEK_TOLERANCE_SECS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("track index {index} is out of range for a playlist of {len}")]
    OutOfRange { index: usize, len: usize },
}

/// Per-track lifecycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No track bound yet.
    #[default]
    Idle,
    /// `load` issued, waiting for the resource to become ready.
    Loading,
    /// Start offset enforced and end resolved; not started yet.
    Ready,
    Playing,
    Paused,
}

/// Which glyph the play/pause control should show.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayPauseIcon {
    /// Media is paused: offer "play".
    #[default]
    Play,
    /// Media is playing: offer "pause".
    Pause,
}

#[derive(Debug, Clone, Default)]
struct PlayerState {
    current_index: usize,
    window: PlaybackWindow,
    autoplay_pending: bool,
    phase: Phase,
    progress_percent: f64,
    icon: PlayPauseIcon,
}

/// What the display should currently show.
#[derive(Debug, Clone, PartialEq)]
pub struct NowShowing {
    /// Bound track index; `None` while idle.
    pub index: Option<usize>,
    pub len: usize,
    pub title: String,
    pub cover: Option<PathBuf>,
    /// Progress through the window. Not clamped below zero.
    pub progress_percent: f64,
    pub icon: PlayPauseIcon,
    pub phase: Phase,
    pub window: PlaybackWindow,
}

pub struct SegmentPlayer<M: MediaResource> {
    media: M,
    playlist: Vec<Track>,
    state: PlayerState,
    seek_tolerance: f64,
}

impl<M: MediaResource> SegmentPlayer<M> {
    /// Create an idle player over `playlist`. No track is bound until `load_track`.
    pub fn new(media: M, playlist: Vec<Track>) -> Self {
        Self {
            media,
            playlist,
            state: PlayerState::default(),
            seek_tolerance: DEFAULT_SEEK_TOLERANCE_SECS,
        }
    }

    pub fn with_seek_tolerance(mut self, secs: f64) -> Self {
        self.seek_tolerance = secs;
        self
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// The bound track, if any.
    pub fn current_track(&self) -> Option<&Track> {
        if self.state.phase == Phase::Idle {
            return None;
        }
        self.playlist.get(self.state.current_index)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn window(&self) -> PlaybackWindow {
        self.state.window
    }

    pub fn autoplay_pending(&self) -> bool {
        self.state.autoplay_pending
    }

    pub fn is_playing(&self) -> bool {
        !self.media.is_paused()
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn now_showing(&self) -> NowShowing {
        let track = self.current_track();
        NowShowing {
            index: track.map(|_| self.state.current_index),
            len: self.playlist.len(),
            title: track.map(Track::display_title).unwrap_or_default(),
            cover: track
                .map(|t| t.cover_path.clone())
                .filter(|p| !p.as_os_str().is_empty()),
            progress_percent: self.state.progress_percent,
            icon: self.state.icon,
            phase: self.state.phase,
            window: self.state.window,
        }
    }

    /// Bind track `index` to the media resource and load it paused.
    ///
    /// Playback is not started here; if `autoplay` is set it starts once the
    /// resource reports it is ready.
    pub fn load_track(&mut self, index: usize, autoplay: bool) -> Result<(), PlayerError> {
        let len = self.playlist.len();
        let Some(track) = self.playlist.get(index) else {
            return Err(PlayerError::OutOfRange { index, len });
        };

        let window = PlaybackWindow::from_track(track);
        self.media.set_source(&track.media_path);
        debug!(
            index,
            path = %track.media_path.display(),
            ?window,
            autoplay,
            "loading track"
        );

        self.state.current_index = index;
        self.state.window = window;
        self.state.autoplay_pending = autoplay;
        self.state.progress_percent = 0.0;
        self.state.phase = Phase::Loading;

        // Pause right away so the start offset is applied before anything plays.
        self.media.load();
        self.media.pause();
        self.refresh_icon();
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.media.is_paused() {
            self.state.autoplay_pending = true;
            self.media.play();
        } else {
            self.media.pause();
            self.state.autoplay_pending = false;
            if self.state.phase == Phase::Playing {
                self.state.phase = Phase::Paused;
            }
        }
        self.refresh_icon();
    }

    /// Pause if playing and drop any pending autoplay.
    pub fn stop(&mut self) {
        self.state.autoplay_pending = false;
        if !self.media.is_paused() {
            self.media.pause();
            if matches!(self.state.phase, Phase::Ready | Phase::Playing) {
                self.state.phase = Phase::Paused;
            }
        }
        self.refresh_icon();
    }

    pub fn next_track(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            debug!("next_track ignored: playlist is empty");
            return;
        }
        let next = (self.state.current_index + 1) % len;
        self.advance_to(next);
    }

    pub fn prev_track(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            debug!("prev_track ignored: playlist is empty");
            return;
        }
        let prev = (self.state.current_index + len - 1) % len;
        self.advance_to(prev);
    }

    fn advance_to(&mut self, index: usize) {
        let autoplay = !self.media.is_paused();
        if let Err(e) = self.load_track(index, autoplay) {
            warn!("track change failed: {e}");
        }
    }

    /// Drain the media resource's pending notifications, in order.
    pub fn pump_media_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.media.poll_event() {
            self.handle_media_event(event);
            handled += 1;
        }
        handled
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeAdvanced => self.on_time_advanced(),
            MediaEvent::ReadyToPlay => self.on_ready_to_play(),
            MediaEvent::PlaybackStarted => self.on_playback_started(),
            MediaEvent::PlayRejected(reason) => self.on_play_rejected(&reason),
            MediaEvent::Ended => self.on_source_ended(),
        }
    }

    fn on_time_advanced(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        let Some(duration) = self.media.duration().filter(|d| *d > 0.0) else {
            return;
        };

        let position = self.media.current_time();
        let track_start = self.state.window.start;
        let track_end = self.state.window.end_with(Some(duration)).unwrap_or(duration);

        if position >= track_end && track_end > 0.0 {
            info!(
                index = self.state.current_index,
                position, track_end, "segment end reached"
            );
            self.next_track();
            return;
        }

        let span = track_end - track_start;
        if span <= 0.0 {
            return;
        }
        let percent = (position - track_start) / span * 100.0;
        self.state.progress_percent = percent.min(100.0);
    }

    fn on_ready_to_play(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        self.enforce_window_start();

        if self.state.window.resolve(self.media.duration()) {
            debug!(window = ?self.state.window, "resolved window end from duration");
        }
        if self.state.phase == Phase::Loading {
            self.state.phase = Phase::Ready;
        }

        if self.state.autoplay_pending {
            self.media.play();
            self.state.autoplay_pending = false;
        }
        self.refresh_icon();
    }

    fn on_playback_started(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        // A pause issued before this notification was pumped wins.
        if self.media.is_paused() {
            debug!("playback started but media is paused again");
            if matches!(self.state.phase, Phase::Ready | Phase::Playing) {
                self.state.phase = Phase::Paused;
            }
            self.refresh_icon();
            return;
        }
        // Hosts may resume from a cached position instead of the window start.
        self.enforce_window_start();
        self.state.phase = Phase::Playing;
        self.refresh_icon();
    }

    fn on_source_ended(&mut self) {
        if self.state.phase == Phase::Idle {
            return;
        }
        info!(
            index = self.state.current_index,
            "source ended before the window end"
        );
        self.state.autoplay_pending = false;
        if self.state.phase == Phase::Playing {
            self.state.phase = Phase::Paused;
        }
        self.refresh_icon();
    }

    fn on_play_rejected(&mut self, reason: &str) {
        warn!(index = self.state.current_index, "playback start rejected: {reason}");
        self.state.autoplay_pending = false;
        if matches!(self.state.phase, Phase::Ready | Phase::Playing) {
            self.state.phase = Phase::Paused;
        }
        self.refresh_icon();
    }

    fn enforce_window_start(&mut self) {
        let start = self.state.window.start;
        if (self.media.current_time() - start).abs() > self.seek_tolerance {
            debug!(from = self.media.current_time(), to = start, "seeking to window start");
            self.media.set_current_time(start);
        }
    }

    fn refresh_icon(&mut self) {
        self.state.icon = if self.media.is_paused() {
            PlayPauseIcon::Play
        } else {
            PlayPauseIcon::Pause
        };
    }
}
