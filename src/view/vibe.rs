//! Ambience window: an animated equalizer standing in for the looping video

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::media::AmbientFrame;
use super::utils::accent_color;

const BAR_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Height (0..=1) of column `x` at animation step `frame`
fn bar_level(x: usize, frame: u64) -> f64 {
    let t = frame as f64 * 0.35;
    let x = x as f64;
    let wave = (x * 0.45 + t).sin() * 0.5 + (x * 0.17 - t * 0.6).sin() * 0.3 + (x * 1.3 + t * 1.7).sin() * 0.2;
    ((wave + 1.0) / 2.0).clamp(0.0, 1.0)
}

fn bar_rows(width: usize, height: usize, frame: &AmbientFrame) -> Vec<Line<'static>> {
    let levels: Vec<f64> = (0..width)
        .map(|x| if frame.playing { bar_level(x, frame.frame) } else { 0.05 })
        .collect();

    (0..height)
        .map(|row| {
            // row 0 is the top line
            let floor = (height - 1 - row) as f64 / height as f64;
            let ceil = (height - row) as f64 / height as f64;
            let text: String = levels
                .iter()
                .map(|&level| {
                    if level >= ceil {
                        '█'
                    } else if level <= floor {
                        ' '
                    } else {
                        let fraction = (level - floor) / (ceil - floor);
                        BAR_GLYPHS[((fraction * 7.0).round() as usize).min(7)]
                    }
                })
                .collect();
            Line::from(text)
        })
        .collect()
}

pub fn render_vibe_window(frame: &mut Frame, area: Rect, ambient: &AmbientFrame, is_nightcore: bool) {
    let accent = accent_color(is_nightcore);
    let asset_name = ambient
        .asset
        .as_deref()
        .and_then(|path| std::path::Path::new(path).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "no video".to_string());

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let window = Paragraph::new(bar_rows(inner_width, inner_height, ambient))
        .style(Style::default().fg(accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {asset_name} "))
                .border_style(Style::default().fg(if ambient.playing { accent } else { Color::DarkGray })),
        );
    frame.render_widget(window, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_window_is_flat() {
        let frame = AmbientFrame { asset: None, playing: false, frame: 42 };
        let rows = bar_rows(6, 3, &frame);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].to_string(), "      ");
        assert!(rows[2].to_string().chars().all(|c| c != ' ' && c != '█'));
    }

    #[test]
    fn levels_stay_in_unit_range() {
        for frame in 0..50 {
            for x in 0..80 {
                let level = bar_level(x, frame);
                assert!((0.0..=1.0).contains(&level));
            }
        }
    }
}
