//! View module - UI rendering
//!
//! This module handles all UI rendering for the player using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Status header and transport bar
//! - `vibe`: The ambience window driven by the background video element
//! - `playlist`: Track list
//! - `overlays`: Modal overlays (error toast, add-music prompt, help)

mod utils;
mod layout;
mod vibe;
mod playlist;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::media::{AmbientFrame, LoadState};
use crate::model::{InputMode, PlaybackInfo, UiState};

/// Everything one frame needs, gathered under the model lock
pub struct ViewState<'a> {
    pub playback: &'a PlaybackInfo,
    pub ui_state: &'a UiState,
    pub ambient: &'a AmbientFrame,
    pub load_state: LoadState,
    pub error: Option<&'a str>,
}

pub struct PlayerView;

impl PlayerView {
    pub fn render(frame: &mut Frame, state: &ViewState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Status header
                Constraint::Length(10), // Vibe window
                Constraint::Length(3),  // Transport bar
                Constraint::Min(0),     // Playlist
            ])
            .split(frame.area());

        layout::render_header(frame, chunks[0], state.playback, state.load_state);
        vibe::render_vibe_window(frame, chunks[1], state.ambient, state.playback.mode.is_nightcore);
        layout::render_transport_bar(frame, chunks[2], state.playback);
        playlist::render_playlist(frame, chunks[3], state.playback, state.ui_state.selected);

        if let InputMode::AddMusic { buffer } = &state.ui_state.input_mode {
            overlays::render_add_music_prompt(frame, buffer);
        }

        if let Some(message) = state.error {
            overlays::render_error_toast(frame, message);
        }

        if state.ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
