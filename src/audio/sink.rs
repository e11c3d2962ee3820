//! Utilities for creating `rodio` sinks from media files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use rodio::decoder::DecoderError;
use rodio::{Decoder, OutputStream, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecoderError,
    },
}

/// Create a paused `Sink` for `path` that starts playback at `start_at`.
///
/// Also returns the source's total duration when the decoder or the file's
/// tags can tell.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let decoder = Decoder::new(BufReader::new(file)).map_err(|source| SourceError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let duration = decoder
        .total_duration()
        .or_else(|| tagged_duration(path))
        .filter(|d| !d.is_zero());

    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok((sink, duration))
}

/// Read the duration from the file's properties.
fn tagged_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}
