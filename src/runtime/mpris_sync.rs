use crate::mpris::{MprisHandle, PlaybackStatus, TrackMetadata};
use crate::player::{MediaResource, Phase, SegmentPlayer};

/// What was last published to the bus.
#[derive(Clone, Debug, PartialEq)]
pub struct MprisSnapshot {
    pub track: Option<TrackMetadata>,
    pub playback: PlaybackStatus,
}

pub fn snapshot<M: MediaResource>(player: &SegmentPlayer<M>) -> MprisSnapshot {
    let now = player.now_showing();
    let track = match (now.index, player.current_track()) {
        (Some(index), Some(t)) => Some(TrackMetadata {
            index,
            title: now.title.clone(),
            media_path: t.media_path.clone(),
            length_secs: now.window.length(),
        }),
        _ => None,
    };

    let playback = if now.phase == Phase::Idle {
        PlaybackStatus::Stopped
    } else if player.is_playing() {
        PlaybackStatus::Playing
    } else {
        PlaybackStatus::Paused
    };

    MprisSnapshot { track, playback }
}

/// Publish the player's state when it differs from `last`.
pub fn update_mpris<M: MediaResource>(
    mpris: &MprisHandle,
    player: &SegmentPlayer<M>,
    last: &mut Option<MprisSnapshot>,
) {
    let current = snapshot(player);
    if last.as_ref() == Some(&current) {
        return;
    }
    mpris.set_track_metadata(current.track.as_ref());
    mpris.set_playback(current.playback);
    *last = Some(current);
}
