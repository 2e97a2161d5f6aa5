//! Status header and transport bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::media::LoadState;
use crate::model::PlaybackInfo;
use super::utils::{accent_color, truncate_string};

pub fn render_header(frame: &mut Frame, area: Rect, playback: &PlaybackInfo, load_state: LoadState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Track name
            Constraint::Length(14), // Load state
        ])
        .split(area);

    let accent = accent_color(playback.mode.is_nightcore);
    let name_width = chunks[0].width.saturating_sub(14) as usize;

    let track_text = match playback.current_track() {
        Some(track) => truncate_string(&track.name, name_width),
        None => "Waiting for tracks...".to_string(),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled("STATUS: ", Style::default().fg(Color::DarkGray)),
        Span::styled(track_text, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1))
            .border_style(Style::default().fg(accent)),
    );
    frame.render_widget(status, chunks[0]);

    let (label, color) = match load_state {
        LoadState::NoTrack => ("idle", Color::DarkGray),
        LoadState::Loading => ("loading", Color::Yellow),
        LoadState::Ready => ("ready", Color::Green),
        LoadState::Failed => ("failed", Color::Red),
    };
    let load = Paragraph::new(label)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Track "));
    frame.render_widget(load, chunks[1]);
}

pub fn render_transport_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let accent = accent_color(playback.mode.is_nightcore);

    let play_symbol = if playback.is_playing { "⏸" } else { "▶" };
    let nightcore_text = if playback.mode.is_nightcore {
        format!("⚡ NIGHTCORE ON ({:.1}x)", playback.mode.playback_rate())
    } else {
        "⚡ NIGHTCORE OFF".to_string()
    };

    let controls = Line::from(vec![
        Span::styled(" ⏮  ", Style::default().fg(Color::White)),
        Span::styled(play_symbol, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled("  ⏭ ", Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled(
            nightcore_text,
            if playback.mode.is_nightcore {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ),
    ]);

    let bar = Paragraph::new(controls).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title_bottom(Line::from(" h: help ").right_aligned()),
    );
    frame.render_widget(bar, area);
}
