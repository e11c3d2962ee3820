//! Segment player: sequences playlist entries and keeps each inside its window.
//!
//! The player is generic over `MediaResource` so the state machine can run
//! against the rodio backend in `audio` or an in-memory fake in tests.

mod media;
mod segment;
mod window;

pub use media::{MediaEvent, MediaResource};
pub use segment::{
    DEFAULT_SEEK_TOLERANCE_SECS, NowShowing, Phase, PlayPauseIcon, PlayerError, SegmentPlayer,
};
pub use window::{PlaybackWindow, WindowEnd};

#[cfg(test)]
mod tests;
