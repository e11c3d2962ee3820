use super::media::accept;
use super::thread::tick_report;
use super::types::{MediaHandle, MediaInfo, Notification, Signal};
use crate::player::MediaEvent;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn handle(paused: bool) -> MediaHandle {
    Arc::new(Mutex::new(MediaInfo {
        paused,
        ..MediaInfo::default()
    }))
}

fn note(generation: u64, signal: Signal) -> Notification {
    Notification { generation, signal }
}

#[test]
fn media_info_starts_paused_with_unknown_duration() {
    let info = MediaInfo::default();
    assert!(info.paused);
    assert!(info.duration.is_none());
}

#[test]
fn accept_forwards_current_generation_events() {
    let info = handle(false);
    let ev = accept(note(3, Signal::Media(MediaEvent::TimeAdvanced)), 3, &info);
    assert_eq!(ev, Some(MediaEvent::TimeAdvanced));
    assert!(!info.lock().unwrap().paused);
}

#[test]
fn accept_drops_notifications_from_superseded_loads() {
    let info = handle(false);
    for signal in [
        Signal::Media(MediaEvent::ReadyToPlay),
        Signal::Media(MediaEvent::TimeAdvanced),
        Signal::Ended,
    ] {
        assert_eq!(accept(note(2, signal), 3, &info), None);
    }
    // A stale end-of-source must not pause the newly loaded track.
    assert!(!info.lock().unwrap().paused);
}

#[test]
fn accept_applies_end_of_source_as_pause() {
    let info = handle(false);
    assert_eq!(
        accept(note(1, Signal::Ended), 1, &info),
        Some(MediaEvent::Ended)
    );
    assert!(info.lock().unwrap().paused);
}

#[test]
fn accept_reverts_paused_flag_on_rejection() {
    let info = handle(false);
    let ev = accept(
        note(0, Signal::Media(MediaEvent::PlayRejected("no device".into()))),
        0,
        &info,
    );
    assert_eq!(ev, Some(MediaEvent::PlayRejected("no device".into())));
    assert!(info.lock().unwrap().paused);
}

#[test]
fn tick_reports_position_while_playing() {
    let report = tick_report(Duration::from_secs(12), Some(Duration::from_secs(60)), false);
    assert_eq!(report.position, Duration::from_secs(12));
    assert_eq!(report.signals, vec![Signal::Media(MediaEvent::TimeAdvanced)]);
    assert!(!report.ended);
}

#[test]
fn exhausted_source_reports_duration_then_time_then_end() {
    let report = tick_report(
        Duration::from_millis(59_800),
        Some(Duration::from_secs(60)),
        true,
    );
    assert_eq!(report.position, Duration::from_secs(60));
    assert_eq!(
        report.signals,
        vec![Signal::Media(MediaEvent::TimeAdvanced), Signal::Ended]
    );
    assert!(report.ended);
}

#[test]
fn exhausted_source_without_duration_keeps_last_position() {
    let report = tick_report(Duration::from_secs(7), None, true);
    assert_eq!(report.position, Duration::from_secs(7));
    assert!(report.ended);
}

#[test]
fn time_advanced_at_end_is_seen_while_still_playing() {
    // The player samples `paused` when the window end triggers an advance;
    // only the following `Ended` may flip it.
    let info = handle(false);
    let report = tick_report(Duration::from_secs(59), Some(Duration::from_secs(60)), true);
    let mut signals = report.signals.into_iter();

    let first = signals.next().unwrap();
    assert_eq!(
        accept(note(4, first), 4, &info),
        Some(MediaEvent::TimeAdvanced)
    );
    assert!(!info.lock().unwrap().paused);

    let second = signals.next().unwrap();
    assert_eq!(accept(note(4, second), 4, &info), Some(MediaEvent::Ended));
    assert!(info.lock().unwrap().paused);
}
