//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It only
//! reads player state; all mutation happens in the runtime event loop.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::UiSettings;
use crate::player::{NowShowing, Phase, PlayPauseIcon, PlaybackWindow, WindowEnd};
use crate::playlist::{Profile, Track};

const CONTROLS: [(&str, &str); 5] = [
    ("space/p", "play/pause"),
    ("h/b", "prev clip"),
    ("l/n", "next clip"),
    ("y", "copy contact id"),
    ("q", "quit"),
];

/// Everything one frame needs.
pub struct Screen<'a> {
    pub profile: &'a Profile,
    pub playlist: &'a [Track],
    pub now: NowShowing,
    /// Media position in seconds.
    pub position: f64,
    /// One-off message such as a clipboard fallback.
    pub status: Option<&'a str>,
}

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `MM:SS`. Negative and non-finite values render as `00:00`.
fn format_mmss(secs: f64) -> String {
    let secs = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn window_text(window: &PlaybackWindow) -> String {
    let end = match window.end {
        WindowEnd::At(end) => format_mmss(end),
        WindowEnd::UseDuration => "end".to_string(),
    };
    format!("{}–{}", format_mmss(window.start), end)
}

/// Gauge ratio from a progress percentage, clamped to `0.0..=1.0`.
fn gauge_ratio(progress_percent: f64) -> f64 {
    if progress_percent.is_nan() {
        return 0.0;
    }
    (progress_percent / 100.0).clamp(0.0, 1.0)
}

fn icon_glyph(icon: PlayPauseIcon) -> &'static str {
    match icon {
        PlayPauseIcon::Play => "▶",
        PlayPauseIcon::Pause => "⏸",
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Ready => "ready",
        Phase::Playing => "playing",
        Phase::Paused => "paused",
    }
}

fn now_playing_text(screen: &Screen<'_>, ui: &UiSettings) -> String {
    let now = &screen.now;
    let Some(index) = now.index else {
        return if now.len == 0 {
            "No clips configured".to_string()
        } else {
            "Nothing loaded".to_string()
        };
    };

    let mut lines = vec![format!(
        "{} {}  ({}/{})",
        icon_glyph(now.icon),
        now.title,
        index + 1,
        now.len
    )];
    lines.push(format!(
        "window {}  at {}  [{}]",
        window_text(&now.window),
        format_mmss(screen.position),
        phase_label(now.phase)
    ));
    if ui.show_cover_path {
        if let Some(cover) = &now.cover {
            lines.push(format!("cover {}", cover.display()));
        }
    }
    lines.join("\n")
}

fn padded(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame`.
pub fn draw(frame: &mut Frame, screen: &Screen<'_>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let profile = screen.profile;
    let header = Paragraph::new(format!(
        "{}  ·  {}\n{}",
        profile.name, profile.contact_id, ui_settings.header_text
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" excerpt ")
            .title_alignment(Alignment::Center)
            .title_bottom(format!(" {} ", profile.avatar_path)),
    );
    frame.render_widget(header, chunks[0]);

    let now_par = Paragraph::new(now_playing_text(screen, ui_settings))
        .block(padded(" now playing "))
        .wrap(Wrap { trim: true });
    frame.render_widget(now_par, chunks[1]);

    let ratio = gauge_ratio(screen.now.progress_percent);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("{:.0}%", ratio * 100.0));
    frame.render_widget(gauge, chunks[2]);

    let items: Vec<ListItem> = screen
        .playlist
        .iter()
        .map(|t| ListItem::new(t.display_title()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" clips "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(screen.now.index);
    frame.render_stateful_widget(list, chunks[3], &mut state);

    let footer_text = match screen.status {
        Some(msg) => format!("{msg}\n{}", controls_text()),
        None => controls_text(),
    };
    let footer = Paragraph::new(footer_text)
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    let footer = if screen.status.is_some() {
        footer.bold()
    } else {
        footer
    };
    frame.render_widget(footer, chunks[4]);
}
