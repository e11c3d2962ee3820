//! Playlist model and the widget settings document it is loaded from.
//!
//! `Track` values are immutable once loaded; the player only reads them.

mod model;
mod settings;
mod time_spec;

pub use model::Track;
pub use settings::{Profile, SettingsError, WidgetSettings};
pub use time_spec::{TimeSpec, TimeSpecError, parse_time_spec, time_to_seconds};
