use crate::playlist::{TimeSpec, Track, time_to_seconds};

/// Upper bound of a playback window.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WindowEnd {
    /// Not yet known: use the media's total duration.
    UseDuration,
    /// Explicit end offset in seconds.
    At(f64),
}

/// The `start`..`end` range a track is restricted to, in seconds.
///
/// Built symbolically when a track is loaded and resolved once the media
/// duration becomes known.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaybackWindow {
    pub start: f64,
    pub end: WindowEnd,
}

impl Default for PlaybackWindow {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: WindowEnd::UseDuration,
        }
    }
}

impl PlaybackWindow {
    pub fn from_specs(start: TimeSpec, end: TimeSpec) -> Self {
        let start = match start {
            TimeSpec::Seconds(s) => s,
            // "end" as a start offset makes no sense; treat it as the beginning.
            TimeSpec::Start | TimeSpec::End => 0.0,
        };
        // An explicit zero end means "play to the end" as well.
        let end = match end {
            TimeSpec::Seconds(s) if s > 0.0 => WindowEnd::At(s),
            _ => WindowEnd::UseDuration,
        };
        Self { start, end }
    }

    pub fn from_track(track: &Track) -> Self {
        Self::from_specs(time_to_seconds(&track.start), time_to_seconds(&track.end))
    }

    /// The effective end given the media's `duration`, if any.
    pub fn end_with(&self, duration: Option<f64>) -> Option<f64> {
        match self.end {
            WindowEnd::At(s) => Some(s),
            WindowEnd::UseDuration => duration,
        }
    }

    /// Pin a `UseDuration` end to `duration`. Returns true if the end changed.
    pub fn resolve(&mut self, duration: Option<f64>) -> bool {
        match (self.end, duration) {
            (WindowEnd::UseDuration, Some(d)) if d > 0.0 => {
                self.end = WindowEnd::At(d);
                true
            }
            _ => false,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.end, WindowEnd::At(_))
    }

    /// Window length in seconds once resolved; `None` for degenerate windows.
    pub fn length(&self) -> Option<f64> {
        match self.end {
            WindowEnd::At(end) if end > self.start => Some(end - self.start),
            _ => None,
        }
    }
}
