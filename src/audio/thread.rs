use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::player::MediaEvent;

use super::sink::create_sink_at;
use super::types::{AudioCmd, MediaHandle, Notification, Signal};

/// The source currently bound to the output.
struct Loaded {
    path: PathBuf,
    sink: Sink,
    duration: Option<Duration>,
    /// Offset already skipped when the sink was built with `skip_duration`.
    seek_base: Duration,
    playing: bool,
    ended: bool,
}

impl Loaded {
    fn position(&self) -> Duration {
        self.seek_base + self.sink.get_pos()
    }
}

struct Worker {
    stream: Option<OutputStream>,
    loaded: Option<Loaded>,
    generation: u64,
    info: MediaHandle,
    events: Sender<Notification>,
}

impl Worker {
    fn notify(&self, signal: Signal) {
        let _ = self.events.send(Notification {
            generation: self.generation,
            signal,
        });
    }

    fn publish_position(&self, position: Duration) {
        if let Ok(mut info) = self.info.lock() {
            info.position = position;
        }
    }

    fn load(&mut self, path: PathBuf, generation: u64) {
        if let Some(old) = self.loaded.take() {
            old.sink.stop();
        }
        self.generation = generation;

        let Some(stream) = self.stream.as_ref() else {
            warn!(path = %path.display(), "no audio output; cannot load");
            return;
        };

        match create_sink_at(stream, &path, Duration::ZERO) {
            Ok((sink, duration)) => {
                debug!(path = %path.display(), ?duration, generation, "source ready");
                if let Ok(mut info) = self.info.lock() {
                    info.position = Duration::ZERO;
                    info.duration = duration;
                }
                self.loaded = Some(Loaded {
                    path,
                    sink,
                    duration,
                    seek_base: Duration::ZERO,
                    playing: false,
                    ended: false,
                });
                self.notify(Signal::Media(MediaEvent::ReadyToPlay));
            }
            Err(e) => warn!("{e}"),
        }
    }

    fn play(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            self.notify(Signal::Media(MediaEvent::PlayRejected(
                "no playable media loaded".to_string(),
            )));
            return;
        };

        // Playing an exhausted source restarts it, like a media element does.
        if loaded.ended {
            if let Some(stream) = self.stream.as_ref() {
                match create_sink_at(stream, &loaded.path, Duration::ZERO) {
                    Ok((sink, _)) => {
                        loaded.sink.stop();
                        loaded.sink = sink;
                        loaded.seek_base = Duration::ZERO;
                        loaded.ended = false;
                    }
                    Err(e) => {
                        let reason = e.to_string();
                        self.notify(Signal::Media(MediaEvent::PlayRejected(reason)));
                        return;
                    }
                }
            }
        }

        loaded.sink.play();
        loaded.playing = true;
        let position = loaded.position();
        self.publish_position(position);
        self.notify(Signal::Media(MediaEvent::PlaybackStarted));
    }

    fn pause(&mut self) {
        if let Some(loaded) = self.loaded.as_mut() {
            loaded.sink.pause();
            loaded.playing = false;
            let position = loaded.position();
            self.publish_position(position);
        }
    }

    fn seek(&mut self, to: Duration) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };

        match loaded.sink.try_seek(to) {
            Ok(()) => loaded.seek_base = Duration::ZERO,
            Err(e) => {
                // Not every decoder can seek; rebuild the sink and skip into the file instead.
                debug!("try_seek failed ({e}); rebuilding sink at {to:?}");
                let Some(stream) = self.stream.as_ref() else {
                    return;
                };
                match create_sink_at(stream, &loaded.path, to) {
                    Ok((sink, _)) => {
                        if loaded.playing {
                            sink.play();
                        }
                        loaded.sink.stop();
                        loaded.sink = sink;
                        loaded.seek_base = to;
                    }
                    Err(e) => {
                        warn!("seek failed: {e}");
                        return;
                    }
                }
            }
        }
        loaded.ended = false;
        self.publish_position(to);
    }

    fn tick(&mut self) {
        let Some(loaded) = self.loaded.as_mut() else {
            return;
        };
        if !loaded.playing || loaded.ended {
            return;
        }

        let report = tick_report(loaded.position(), loaded.duration, loaded.sink.empty());
        if report.ended {
            loaded.ended = true;
            loaded.playing = false;
        }
        self.publish_position(report.position);
        for signal in report.signals {
            self.notify(signal);
        }
    }

    fn quit(&mut self, fade_out_ms: u64) {
        if let Some(loaded) = self.loaded.take() {
            // Fade out gently before stopping.
            fade_out_sink(&loaded.sink, fade_out_ms);
            loaded.sink.stop();
        }
        if let Ok(mut info) = self.info.lock() {
            info.paused = true;
        }
    }
}

/// What one tick of a playing source publishes.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TickReport {
    pub position: Duration,
    pub signals: Vec<Signal>,
    pub ended: bool,
}

/// Decide what a tick reports for a playing source.
///
/// An exhausted source reports its full duration and a `TimeAdvanced` before
/// `Ended`, so a window ending at the file's end is seen while still playing.
pub(super) fn tick_report(
    position: Duration,
    duration: Option<Duration>,
    exhausted: bool,
) -> TickReport {
    if exhausted {
        TickReport {
            position: duration.unwrap_or(position),
            signals: vec![Signal::Media(MediaEvent::TimeAdvanced), Signal::Ended],
            ended: true,
        }
    } else {
        TickReport {
            position,
            signals: vec![Signal::Media(MediaEvent::TimeAdvanced)],
            ended: false,
        }
    }
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 || sink.is_paused() {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    sink.set_volume(1.0);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(1.0 - t);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<Notification>,
    info: MediaHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!("no audio output device: {e}");
                None
            }
        };

        let mut worker = Worker {
            stream,
            loaded: None,
            generation: 0,
            info,
            events,
        };

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load { path, generation } => worker.load(path, generation),
                    AudioCmd::Play => worker.play(),
                    AudioCmd::Pause => worker.pause(),
                    AudioCmd::Seek(to) => worker.seek(to),
                    AudioCmd::Quit { fade_out_ms } => {
                        worker.quit(fade_out_ms);
                        info!("audio thread stopped");
                        break;
                    }
                },
                // Periodic position update / end-of-source check.
                Err(RecvTimeoutError::Timeout) => worker.tick(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
