use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::warn;

use crate::config::AudioSettings;
use crate::player::{MediaEvent, MediaResource};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, MediaHandle, MediaInfo, Notification, Signal};

/// `MediaResource` backed by a `rodio` sink running on its own thread.
pub struct RodioMedia {
    tx: Sender<AudioCmd>,
    events: Receiver<Notification>,
    info: MediaHandle,
    source: Option<PathBuf>,
    generation: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioMedia {
    pub fn new(audio_settings: &AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events) = mpsc::channel::<Notification>();
        let info: MediaHandle = Arc::new(Mutex::new(MediaInfo::default()));

        let audio_handle = spawn_audio_thread(
            rx,
            events_tx,
            info.clone(),
            Duration::from_millis(audio_settings.tick_ms),
        );

        Self {
            tx,
            events,
            info,
            source: None,
            generation: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if let Err(e) = self.tx.send(cmd) {
            warn!("audio thread is gone, dropped {:?}", e.0);
        }
    }

    fn with_info<T>(&self, f: impl FnOnce(&mut MediaInfo) -> T) -> Option<T> {
        self.info.lock().ok().map(|mut info| f(&mut info))
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

/// Decide what a notification means for the player side.
///
/// Notifications from an older load are dropped. `Ended` and `PlayRejected`
/// flip the shared paused flag before they are forwarded.
pub(super) fn accept(
    notification: Notification,
    generation: u64,
    info: &MediaHandle,
) -> Option<MediaEvent> {
    if notification.generation != generation {
        return None;
    }

    let set_paused = || {
        if let Ok(mut i) = info.lock() {
            i.paused = true;
        }
    };

    match notification.signal {
        Signal::Ended => {
            set_paused();
            Some(MediaEvent::Ended)
        }
        Signal::Media(MediaEvent::PlayRejected(reason)) => {
            set_paused();
            Some(MediaEvent::PlayRejected(reason))
        }
        Signal::Media(event) => Some(event),
    }
}

impl MediaResource for RodioMedia {
    fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
    }

    fn load(&mut self) {
        self.generation += 1;
        self.with_info(|info| {
            info.position = Duration::ZERO;
            info.duration = None;
            info.paused = true;
        });

        match self.source.clone() {
            Some(path) => self.send(AudioCmd::Load {
                path,
                generation: self.generation,
            }),
            None => warn!("load requested with no source bound"),
        }
    }

    fn play(&mut self) {
        self.with_info(|info| info.paused = false);
        self.send(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.with_info(|info| info.paused = true);
        self.send(AudioCmd::Pause);
    }

    fn current_time(&self) -> f64 {
        self.with_info(|info| info.position.as_secs_f64())
            .unwrap_or(0.0)
    }

    fn set_current_time(&mut self, secs: f64) {
        if !secs.is_finite() {
            return;
        }
        let to = Duration::from_secs_f64(secs.max(0.0));
        self.with_info(|info| info.position = to);
        self.send(AudioCmd::Seek(to));
    }

    fn duration(&self) -> Option<f64> {
        self.with_info(|info| info.duration.map(|d| d.as_secs_f64()))
            .flatten()
    }

    fn is_paused(&self) -> bool {
        self.with_info(|info| info.paused).unwrap_or(true)
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        loop {
            let notification = self.events.try_recv().ok()?;
            if let Some(event) = accept(notification, self.generation, &self.info) {
                return Some(event);
            }
        }
    }
}
