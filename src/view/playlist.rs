//! Playlist rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::{accent_color, calculate_num_width, render_scrollable_list, truncate_string};

pub fn render_playlist(frame: &mut Frame, area: Rect, playback: &PlaybackInfo, selected: usize) {
    let accent = accent_color(playback.mode.is_nightcore);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Playlist ({}) ", playback.tracks.len()))
        .title_bottom(" a: add music ")
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(accent));

    if playback.tracks.is_empty() {
        let empty = Paragraph::new("No tracks found (╥﹏╥)\n\nPress 'a' to add a file or folder")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let num_width = calculate_num_width(playback.tracks.len());
    let name_width = (area.width as usize).saturating_sub(num_width + 8);

    let items: Vec<ListItem> = playback
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = i == playback.current_index;
            let marker = if is_current && playback.is_playing { "♫" } else { " " };
            let text = format!(
                "{:>width$} {} {}",
                i + 1,
                marker,
                truncate_string(&track.name, name_width),
                width = num_width
            );

            let mut style = if is_current {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            if i == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(text).style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, selected, block);
}
