use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::audio::RodioMedia;
use crate::mpris::ControlCmd;
use crate::player::SegmentPlayer;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(Some(path)) => info!("logging to {}", path.display()),
        Ok(None) => {}
        Err(e) => eprintln!("excerpt: logging disabled: {e}"),
    }

    let widget_path = settings::widget_settings_path(env::args().nth(1), &settings.widget);
    let (widget, status) = startup::load_widget_settings(&widget_path);

    let media = RodioMedia::new(&settings.audio);
    let mut player = SegmentPlayer::new(media, widget.tracks)
        .with_seek_tolerance(settings.playback.seek_tolerance_secs);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    startup::start_playlist(&mut player, &settings.playback);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::new(status);
    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &widget.profile,
        &mut player,
        &mpris,
        &control_rx,
        &mut state,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
