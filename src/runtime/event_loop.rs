use std::sync::mpsc;
use std::time::Duration;

use crossterm::clipboard::CopyToClipboard;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info, warn};

use crate::audio::RodioMedia;
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{MediaResource, SegmentPlayer};
use crate::playlist::Profile;
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::ui::{self, Screen};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Message shown above the controls until the next key press.
    pub status: Option<String>,
    /// Last state published over MPRIS.
    pub last_mpris: Option<MprisSnapshot>,
}

impl EventLoopState {
    pub fn new(status: Option<String>) -> Self {
        Self {
            status,
            last_mpris: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Control(ControlCmd),
    CopyContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    let cmd = match code {
        KeyCode::Char(' ') | KeyCode::Char('p') => ControlCmd::PlayPause,
        KeyCode::Char('l') | KeyCode::Char('n') => ControlCmd::Next,
        KeyCode::Char('h') | KeyCode::Char('b') => ControlCmd::Prev,
        KeyCode::Char('q') => ControlCmd::Quit,
        KeyCode::Char('y') => return Some(KeyAction::CopyContact),
        _ => return None,
    };
    Some(KeyAction::Control(cmd))
}

/// Apply a playback command to the player.
///
/// `Play`/`Pause` are idempotent: they only toggle when the state differs.
/// `Stop` pauses and cancels a pending autoplay.
pub fn apply_control<M: MediaResource>(player: &mut SegmentPlayer<M>, cmd: ControlCmd) -> Flow {
    let bound = player.current_track().is_some();
    match cmd {
        ControlCmd::Quit => return Flow::Quit,
        ControlCmd::PlayPause if bound => player.toggle_play_pause(),
        ControlCmd::Play if bound && !player.is_playing() => player.toggle_play_pause(),
        ControlCmd::Pause if bound && player.is_playing() => player.toggle_play_pause(),
        ControlCmd::Stop if bound => player.stop(),
        ControlCmd::Next => player.next_track(),
        ControlCmd::Prev => player.prev_track(),
        other => debug!("ignoring {other:?}"),
    }
    Flow::Continue
}

/// Main terminal event loop: handles input, UI drawing, media notifications
/// and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    profile: &Profile,
    player: &mut SegmentPlayer<RodioMedia>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let fade_out = Duration::from_millis(settings.audio.quit_fade_out_ms);

    loop {
        player.pump_media_events();
        update_mpris(mpris, player, &mut state.last_mpris);

        {
            let screen = Screen {
                profile,
                playlist: player.playlist(),
                now: player.now_showing(),
                position: player.media().current_time(),
                status: state.status.as_deref(),
            };
            terminal.draw(|f| ui::draw(f, &screen, &settings.ui))?;
        }

        while let Ok(cmd) = control_rx.try_recv() {
            debug!("mpris: {cmd:?}");
            if apply_control(player, cmd) == Flow::Quit {
                info!("quit requested over mpris");
                player.media().quit_softly(fade_out);
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                state.status = None;
                match key_action(key.code) {
                    Some(KeyAction::Control(cmd)) => {
                        if apply_control(player, cmd) == Flow::Quit {
                            player.media().quit_softly(fade_out);
                            return Ok(());
                        }
                    }
                    Some(KeyAction::CopyContact) => {
                        state.status = Some(copy_contact(terminal, &profile.contact_id));
                    }
                    None => {}
                }
            }
        }
    }
}

/// Copy `contact_id` through the terminal's OSC 52 clipboard support.
///
/// Terminals never confirm OSC 52, so only a write failure can be detected;
/// the id is then shown for manual copying.
fn copy_contact(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    contact_id: &str,
) -> String {
    match execute!(
        terminal.backend_mut(),
        CopyToClipboard::to_clipboard_from(contact_id)
    ) {
        Ok(()) => {
            info!("copied contact id to clipboard");
            format!("copied {contact_id} to clipboard")
        }
        Err(e) => {
            warn!("clipboard copy failed: {e}");
            format!("copy failed, contact id: {contact_id}")
        }
    }
}
