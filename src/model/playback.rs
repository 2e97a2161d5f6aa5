//! Playback-related types: nightcore mode and render/binding snapshots

use super::types::Track;

pub const NORMAL_RATE: f32 = 1.0;
pub const NIGHTCORE_RATE: f32 = 1.3;

/// Nightcore flag and the media settings derived from it
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeState {
    pub is_nightcore: bool,
}

impl ModeState {
    pub fn toggle(&mut self) {
        self.is_nightcore = !self.is_nightcore;
    }

    pub fn playback_rate(&self) -> f32 {
        if self.is_nightcore { NIGHTCORE_RATE } else { NORMAL_RATE }
    }

    pub fn preserves_pitch(&self) -> bool {
        !self.is_nightcore
    }
}

/// Everything the media binding needs to reconcile the elements
#[derive(Clone, Debug, Default)]
pub struct BindingState {
    pub current_index: usize,
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub mode: ModeState,
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub tracks: Vec<Track>,
    pub current_index: usize,
    pub is_playing: bool,
    pub mode: ModeState,
}

impl PlaybackInfo {
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }
}
