//! Parsing of the `start`/`end` time specifications attached to tracks.
//!
//! A spec is either one of the sentinels `"start"` / `"end"` or a `MM:SS`
//! clock string. Sentinels are resolved later against the media itself.

use thiserror::Error;

/// Sentinel meaning "the natural beginning of the media".
pub const START_SENTINEL: &str = "start";
/// Sentinel meaning "the natural end (duration) of the media".
pub const END_SENTINEL: &str = "end";

/// A parsed time specification.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TimeSpec {
    Start,
    End,
    Seconds(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSpecError {
    #[error("expected MM:SS, got {0:?}")]
    Shape(String),
    #[error("invalid number {part:?} in {spec:?}")]
    Number { spec: String, part: String },
}

/// Strictly parse `spec`, reporting why it is not a sentinel or `MM:SS` clock.
pub fn parse_time_spec(spec: &str) -> Result<TimeSpec, TimeSpecError> {
    match spec {
        START_SENTINEL => return Ok(TimeSpec::Start),
        END_SENTINEL => return Ok(TimeSpec::End),
        _ => {}
    }

    let parts: Vec<&str> = spec.split(':').collect();
    let [minutes, seconds] = parts.as_slice() else {
        return Err(TimeSpecError::Shape(spec.to_string()));
    };

    let minutes = parse_part(spec, minutes)?;
    let seconds = parse_part(spec, seconds)?;
    Ok(TimeSpec::Seconds(minutes * 60.0 + seconds))
}

fn parse_part(spec: &str, part: &str) -> Result<f64, TimeSpecError> {
    let trimmed = part.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| TimeSpecError::Number {
            spec: spec.to_string(),
            part: part.to_string(),
        })
}

/// Lenient conversion used by the player: anything malformed becomes zero seconds.
pub fn time_to_seconds(spec: &str) -> TimeSpec {
    parse_time_spec(spec).unwrap_or(TimeSpec::Seconds(0.0))
}
