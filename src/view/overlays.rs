//! Overlay rendering (error toast, add-music prompt, help popup)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_error_toast(frame: &mut Frame, message: &str) {
    let area = frame.area();

    let popup_width = 44.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4).max(1) as usize;
    let line_count = (message.chars().count() as f32 / inner_width as f32).ceil() as u16;

    // Toast sits at the top of the screen rather than over the playlist
    let popup_area = Rect {
        y: area.y + 1,
        ..centered(area, popup_width, 2 + line_count.max(1))
    };

    frame.render_widget(Clear, popup_area);

    let toast = Paragraph::new(format!("⚠ {message}"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(toast, popup_area);
}

pub fn render_add_music_prompt(frame: &mut Frame, buffer: &str) {
    let area = frame.area();
    let popup_area = centered(area, 60.min(area.width.saturating_sub(4)), 3);

    frame.render_widget(Clear, popup_area);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(buffer.to_string(), Style::default().fg(Color::White)),
        Span::styled("█", Style::default().fg(Color::Green)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Add music: file or folder (Enter / Esc) ")
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(prompt, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = [
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N / →", "Next track"),
        ("P / ←", "Previous track"),
        ("Z", "Toggle nightcore mode"),
        ("", ""),
        ("", "── Playlist ──"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Play selected track"),
        ("A", "Add music"),
        ("", ""),
        ("", "── General ──"),
        ("Esc", "Dismiss error"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_area = centered(area, 46, keybindings.len() as u16 + 2);

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^42}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>12}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
