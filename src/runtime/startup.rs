use std::path::Path;

use tracing::{error, info, warn};

use crate::config;
use crate::player::{MediaResource, SegmentPlayer};
use crate::playlist::WidgetSettings;

/// Read the widget settings document, degrading to an empty playlist.
///
/// Returns the settings plus a status line to show when loading failed.
pub fn load_widget_settings(path: &Path) -> (WidgetSettings, Option<String>) {
    match WidgetSettings::load(path) {
        Ok(w) => {
            info!(
                "loaded {} clip(s) for {} from {}",
                w.tracks.len(),
                w.profile.name,
                path.display()
            );
            (w, None)
        }
        Err(e) => {
            error!("{e}");
            (WidgetSettings::default(), Some(format!("settings unavailable: {e}")))
        }
    }
}

/// Bind the first clip, or log that there is nothing to play.
pub fn start_playlist<M: MediaResource>(
    player: &mut SegmentPlayer<M>,
    playback: &config::PlaybackSettings,
) {
    if player.playlist().is_empty() {
        warn!("playlist is empty; nothing to play");
        return;
    }
    if let Err(e) = player.load_track(0, playback.autoplay_first_track) {
        error!("initial load failed: {e}");
    }
}
