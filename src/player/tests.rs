use super::*;
use crate::playlist::Track;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct FakeMedia {
    source: Option<PathBuf>,
    position: f64,
    duration: Option<f64>,
    paused: bool,
    block_play: bool,
    loads: usize,
    seeks: Vec<f64>,
    events: VecDeque<MediaEvent>,
}

impl FakeMedia {
    fn new(duration: f64) -> Self {
        Self {
            duration: Some(duration),
            paused: true,
            ..Self::default()
        }
    }
}

impl MediaResource for FakeMedia {
    fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
    }

    fn load(&mut self) {
        self.loads += 1;
        self.position = 0.0;
        self.paused = true;
        self.events.push_back(MediaEvent::ReadyToPlay);
    }

    fn play(&mut self) {
        if self.block_play {
            self.paused = true;
            self.events
                .push_back(MediaEvent::PlayRejected("blocked by policy".into()));
        } else {
            self.paused = false;
            self.events.push_back(MediaEvent::PlaybackStarted);
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, secs: f64) {
        self.seeks.push(secs);
        self.position = secs;
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}

fn track(name: &str, start: &str, end: &str) -> Track {
    Track {
        media_path: PathBuf::from(format!("/media/{name}.ogg")),
        cover_path: PathBuf::from(format!("/covers/{name}.jpg")),
        title: name.to_string(),
        start: start.to_string(),
        end: end.to_string(),
    }
}

fn three_tracks() -> Vec<Track> {
    vec![
        track("a", "start", "end"),
        track("b", "start", "end"),
        track("c", "start", "end"),
    ]
}

fn player_with(tracks: Vec<Track>, duration: f64) -> SegmentPlayer<FakeMedia> {
    SegmentPlayer::new(FakeMedia::new(duration), tracks)
}

fn time_at(p: &mut SegmentPlayer<FakeMedia>, position: f64) {
    p.media_mut().position = position;
    p.handle_media_event(MediaEvent::TimeAdvanced);
}

#[test]
fn new_player_is_idle_with_nothing_bound() {
    let p = player_with(three_tracks(), 60.0);
    assert_eq!(p.phase(), Phase::Idle);
    assert!(p.current_track().is_none());
    assert_eq!(p.now_showing().index, None);
    assert!(p.media().source.is_none());
}

#[test]
fn load_track_binds_source_and_pauses() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(2, false).unwrap();

    assert_eq!(p.current_index(), 2);
    assert_eq!(p.phase(), Phase::Loading);
    assert_eq!(p.media().source, Some(PathBuf::from("/media/c.ogg")));
    assert_eq!(p.media().loads, 1);
    assert!(p.media().is_paused());
    assert!(!p.autoplay_pending());

    let shown = p.now_showing();
    assert_eq!(shown.index, Some(2));
    assert_eq!(shown.title, "c");
    assert_eq!(shown.cover, Some(PathBuf::from("/covers/c.jpg")));
    assert_eq!(shown.icon, PlayPauseIcon::Play);
}

#[test]
fn load_track_every_valid_index() {
    let mut p = player_with(three_tracks(), 60.0);
    for i in 0..3 {
        assert!(p.load_track(i, i % 2 == 0).is_ok());
        assert_eq!(p.current_index(), i);
        assert_eq!(p.autoplay_pending(), i % 2 == 0);
    }
}

#[test]
fn load_track_out_of_range_changes_nothing() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(1, false).unwrap();

    let err = p.load_track(3, true).unwrap_err();
    assert_eq!(err, PlayerError::OutOfRange { index: 3, len: 3 });
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.media().loads, 1);
    assert!(!p.autoplay_pending());
    assert_eq!(p.media().source, Some(PathBuf::from("/media/b.ogg")));
}

#[test]
fn ready_seeks_to_window_start_and_resolves_end() {
    let mut p = player_with(vec![track("a", "00:10", "end")], 60.0);
    p.load_track(0, false).unwrap();
    assert_eq!(p.window().end, WindowEnd::UseDuration);

    p.pump_media_events();

    assert_eq!(p.media().seeks, vec![10.0]);
    assert_eq!(p.window().end, WindowEnd::At(60.0));
    assert_eq!(p.phase(), Phase::Ready);
    assert!(p.media().is_paused());
}

#[test]
fn ready_skips_seek_within_tolerance() {
    let mut p = player_with(vec![track("a", "start", "00:30")], 60.0);
    p.load_track(0, false).unwrap();
    p.media_mut().events.clear();
    p.media_mut().position = 0.05;
    p.handle_media_event(MediaEvent::ReadyToPlay);

    assert!(p.media().seeks.is_empty());
    assert_eq!(p.window().end, WindowEnd::At(30.0));
}

#[test]
fn explicit_zero_end_resolves_lazily_to_duration() {
    let mut p = player_with(vec![track("a", "00:05", "00:00")], 42.0);
    p.load_track(0, false).unwrap();
    assert!(!p.window().is_resolved());
    p.pump_media_events();
    assert_eq!(p.window().end, WindowEnd::At(42.0));
}

#[test]
fn ready_with_autoplay_starts_and_clears_intent() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, true).unwrap();
    assert!(p.autoplay_pending());

    p.pump_media_events();

    assert!(!p.autoplay_pending());
    assert!(p.is_playing());
    assert_eq!(p.phase(), Phase::Playing);
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Pause);
}

#[test]
fn rejected_autoplay_is_not_retried() {
    let mut p = player_with(three_tracks(), 60.0);
    p.media_mut().block_play = true;
    p.load_track(0, true).unwrap();

    p.pump_media_events();

    assert!(!p.autoplay_pending());
    assert!(!p.is_playing());
    assert_eq!(p.phase(), Phase::Paused);
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);
    // One ReadyToPlay plus one PlayRejected; nothing queued afterwards.
    assert!(p.media().events.is_empty());
}

#[test]
fn time_advanced_reports_progress_inside_window() {
    let mut p = player_with(vec![track("a", "00:10", "00:20"), track("b", "start", "end")], 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();

    time_at(&mut p, 19.9);
    let progress = p.now_showing().progress_percent;
    assert!((progress - 99.0).abs() < 1e-6, "progress was {progress}");
    assert_eq!(p.current_index(), 0);

    time_at(&mut p, 15.0);
    assert!((p.now_showing().progress_percent - 50.0).abs() < 1e-6);
}

#[test]
fn time_advanced_at_window_end_advances() {
    let mut p = player_with(vec![track("a", "00:10", "00:20"), track("b", "start", "end")], 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();

    time_at(&mut p, 20.0);
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.phase(), Phase::Loading);
    assert_eq!(p.media().source, Some(PathBuf::from("/media/b.ogg")));
}

#[test]
fn time_advanced_past_window_end_advances() {
    let mut p = player_with(vec![track("a", "00:10", "00:20"), track("b", "start", "end")], 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();

    time_at(&mut p, 25.5);
    assert_eq!(p.current_index(), 1);
}

#[test]
fn auto_advance_keeps_playing() {
    let mut p = player_with(vec![track("a", "00:10", "00:20"), track("b", "start", "end")], 60.0);
    p.load_track(0, true).unwrap();
    p.pump_media_events();
    assert!(p.is_playing());

    time_at(&mut p, 20.0);
    assert!(p.autoplay_pending());
    p.pump_media_events();

    assert_eq!(p.current_index(), 1);
    assert!(p.is_playing());
    assert_eq!(p.phase(), Phase::Playing);
}

#[test]
fn degenerate_window_never_updates_progress() {
    let mut p = player_with(vec![track("a", "00:30", "00:10"), track("b", "start", "end")], 60.0);
    p.load_track(0, false).unwrap();
    p.media_mut().events.clear();

    time_at(&mut p, 5.0);
    assert_eq!(p.now_showing().progress_percent, 0.0);
    assert_eq!(p.current_index(), 0);
}

#[test]
fn time_advanced_without_duration_is_ignored() {
    let mut p = player_with(vec![track("a", "start", "end"), track("b", "start", "end")], 60.0);
    p.load_track(0, false).unwrap();
    p.media_mut().duration = None;

    time_at(&mut p, 999.0);
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.now_showing().progress_percent, 0.0);
}

#[test]
fn progress_uses_duration_until_end_is_resolved() {
    let mut p = player_with(vec![track("a", "start", "end")], 80.0);
    p.load_track(0, false).unwrap();
    assert!(!p.window().is_resolved());

    time_at(&mut p, 20.0);
    assert!((p.now_showing().progress_percent - 25.0).abs() < 1e-6);
}

#[test]
fn progress_before_window_start_is_not_clamped_below_zero() {
    let mut p = player_with(vec![track("a", "00:10", "00:20")], 60.0);
    p.load_track(0, false).unwrap();
    p.media_mut().events.clear();

    time_at(&mut p, 5.0);
    assert!((p.now_showing().progress_percent + 50.0).abs() < 1e-6);
}

#[test]
fn playback_started_corrects_drift() {
    let mut p = player_with(vec![track("a", "00:10", "00:20")], 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();
    assert_eq!(p.media().seeks, vec![10.0]);

    // Host resumed from a stale position.
    p.media_mut().paused = false;
    p.media_mut().position = 3.0;
    p.handle_media_event(MediaEvent::PlaybackStarted);
    assert_eq!(p.media().seeks, vec![10.0, 10.0]);
    assert_eq!(p.phase(), Phase::Playing);
}

#[test]
fn toggle_twice_from_paused_returns_to_paused() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);

    p.toggle_play_pause();
    assert!(p.is_playing());
    assert!(p.autoplay_pending());
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Pause);
    p.pump_media_events();
    assert_eq!(p.phase(), Phase::Playing);

    p.toggle_play_pause();
    assert!(!p.is_playing());
    assert!(!p.autoplay_pending());
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);
    assert_eq!(p.phase(), Phase::Paused);
}

#[test]
fn rejected_toggle_rolls_back_intent() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();
    p.media_mut().block_play = true;

    p.toggle_play_pause();
    p.pump_media_events();

    assert!(!p.autoplay_pending());
    assert!(!p.is_playing());
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);
}

#[test]
fn pause_before_playback_started_is_pumped_settles_paused() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();

    p.toggle_play_pause();
    p.toggle_play_pause();
    p.pump_media_events();

    assert!(!p.is_playing());
    assert_eq!(p.phase(), Phase::Paused);
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);
}

#[test]
fn source_ending_inside_window_pauses_without_advancing() {
    let mut p = player_with(vec![track("a", "00:10", "00:50"), track("b", "start", "end")], 40.0);
    p.load_track(0, true).unwrap();
    p.pump_media_events();
    assert_eq!(p.phase(), Phase::Playing);

    time_at(&mut p, 40.0);
    p.media_mut().paused = true;
    p.handle_media_event(MediaEvent::Ended);

    assert_eq!(p.current_index(), 0);
    assert_eq!(p.phase(), Phase::Paused);
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);
    assert!(!p.autoplay_pending());
}

#[test]
fn stop_pauses_and_refreshes_icon() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, true).unwrap();
    p.pump_media_events();
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Pause);

    p.stop();
    assert!(!p.is_playing());
    assert!(!p.autoplay_pending());
    assert_eq!(p.phase(), Phase::Paused);
    assert_eq!(p.now_showing().icon, PlayPauseIcon::Play);

    p.stop();
    assert_eq!(p.phase(), Phase::Paused);
}

#[test]
fn source_ended_while_idle_is_ignored() {
    let mut p = player_with(three_tracks(), 60.0);
    p.handle_media_event(MediaEvent::Ended);
    assert_eq!(p.phase(), Phase::Idle);
}

#[test]
fn next_wraps_to_first_and_prev_wraps_to_last() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(2, false).unwrap();
    p.next_track();
    assert_eq!(p.current_index(), 0);

    p.prev_track();
    assert_eq!(p.current_index(), 2);
}

#[test]
fn next_and_prev_on_empty_playlist_are_noops() {
    let mut p = player_with(Vec::new(), 60.0);
    p.next_track();
    p.prev_track();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.phase(), Phase::Idle);
    assert_eq!(p.media().loads, 0);
    p.toggle_play_pause();
    p.pump_media_events();
    assert_eq!(p.phase(), Phase::Idle);
}

#[test]
fn navigation_round_trip_preserves_paused_state() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();

    p.next_track();
    p.pump_media_events();
    p.next_track();
    p.pump_media_events();
    p.prev_track();
    p.pump_media_events();

    assert_eq!(p.current_index(), 1);
    assert!(!p.is_playing());
    assert_eq!(p.phase(), Phase::Ready);
}

#[test]
fn navigation_round_trip_preserves_playing_state() {
    let mut p = player_with(three_tracks(), 60.0);
    p.load_track(0, false).unwrap();
    p.pump_media_events();
    p.toggle_play_pause();
    p.pump_media_events();

    for step in [true, true, false] {
        if step {
            p.next_track();
        } else {
            p.prev_track();
        }
        assert!(p.autoplay_pending());
        p.pump_media_events();
        assert!(p.is_playing());
    }

    assert_eq!(p.current_index(), 1);
    assert_eq!(p.phase(), Phase::Playing);
}

#[test]
fn window_from_specs_handles_sentinels_in_either_slot() {
    use crate::playlist::TimeSpec;

    let w = PlaybackWindow::from_specs(TimeSpec::End, TimeSpec::Start);
    assert_eq!(w.start, 0.0);
    assert_eq!(w.end, WindowEnd::UseDuration);

    let w = PlaybackWindow::from_specs(TimeSpec::Seconds(5.0), TimeSpec::Seconds(65.0));
    assert_eq!(w.length(), Some(60.0));

    let w = PlaybackWindow::from_specs(TimeSpec::Seconds(30.0), TimeSpec::Seconds(10.0));
    assert_eq!(w.length(), None);
}
