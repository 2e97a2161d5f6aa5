//! Main player model with state management
//!
//! All mutations go through the methods below and report which state slices
//! they touched, so the controller can hand exactly those slices to the media
//! binding.

use super::playback::{BindingState, ModeState, PlaybackInfo};
use super::playlist::PlaylistState;
use super::types::{InputMode, StateChange, Track, TransientError, UiState};

/// Main player model containing all session state
#[derive(Default)]
pub struct PlayerModel {
    playlist: PlaylistState,
    is_playing: bool,
    mode: ModeState,
    error: Option<TransientError>,
    ui_state: UiState,
    should_quit: bool,
}

impl PlayerModel {
    pub fn new() -> Self {
        Self::default()
    }

    // --- playlist store ---

    pub fn append_tracks(&mut self, tracks: Vec<Track>) -> StateChange {
        if !self.playlist.append(tracks) {
            return StateChange::NONE;
        }
        self.error = None;
        StateChange::PLAYLIST
    }

    /// Selecting always reports a track change, even for the current track,
    /// so the binding reloads it and starts playback.
    pub fn select_track(&mut self, index: usize) -> Option<StateChange> {
        if !self.playlist.select(index) {
            return None;
        }
        self.ui_state.selected = index;
        Some(StateChange::TRACK_INDEX | self.set_playing(true))
    }

    pub fn next_track(&mut self) -> StateChange {
        if !self.playlist.advance() {
            return StateChange::NONE;
        }
        self.ui_state.selected = self.playlist.current_index();
        StateChange::TRACK_INDEX | self.set_playing(true)
    }

    pub fn prev_track(&mut self) -> StateChange {
        if !self.playlist.retreat() {
            return StateChange::NONE;
        }
        self.ui_state.selected = self.playlist.current_index();
        StateChange::TRACK_INDEX | self.set_playing(true)
    }

    pub fn has_tracks(&self) -> bool {
        !self.playlist.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.playlist.len()
    }

    pub fn current_index(&self) -> usize {
        self.playlist.current_index()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.current()
    }

    // --- play intent ---

    pub fn set_playing(&mut self, is_playing: bool) -> StateChange {
        if self.is_playing == is_playing {
            return StateChange::NONE;
        }
        self.is_playing = is_playing;
        StateChange::PLAY_INTENT
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    // --- mode ---

    pub fn toggle_nightcore(&mut self) -> StateChange {
        self.mode.toggle();
        StateChange::MODE
    }

    pub fn mode(&self) -> ModeState {
        self.mode
    }

    // --- transient error ---

    /// Replaces any visible error and restarts its display window.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(TransientError::new(message));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error
            .as_ref()
            .filter(|e| !e.is_expired())
            .map(|e| e.message.as_str())
    }

    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    pub fn auto_clear_expired_error(&mut self) {
        if self.error.as_ref().is_some_and(|e| e.is_expired()) {
            self.error = None;
        }
    }

    // --- snapshots ---

    pub fn binding_state(&self) -> BindingState {
        BindingState {
            current_index: self.playlist.current_index(),
            current_track: self.playlist.current().cloned(),
            is_playing: self.is_playing,
            mode: self.mode,
        }
    }

    pub fn get_playback_info(&self) -> PlaybackInfo {
        PlaybackInfo {
            tracks: self.playlist.tracks().to_vec(),
            current_index: self.playlist.current_index(),
            is_playing: self.is_playing,
            mode: self.mode,
        }
    }

    // --- ui ---

    pub fn get_ui_state(&self) -> UiState {
        self.ui_state.clone()
    }

    pub fn selected_index(&self) -> usize {
        self.ui_state.selected
    }

    pub fn move_selection_up(&mut self) {
        self.ui_state.selected = self.ui_state.selected.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.ui_state.selected + 1 < self.playlist.len() {
            self.ui_state.selected += 1;
        }
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.ui_state.input_mode
    }

    pub fn begin_add_music(&mut self) {
        self.ui_state.input_mode = InputMode::AddMusic { buffer: String::new() };
    }

    pub fn append_to_input(&mut self, c: char) {
        if let InputMode::AddMusic { buffer } = &mut self.ui_state.input_mode {
            buffer.push(c);
        }
    }

    pub fn backspace_input(&mut self) {
        if let InputMode::AddMusic { buffer } = &mut self.ui_state.input_mode {
            buffer.pop();
        }
    }

    /// Leaves the prompt, returning whatever was typed.
    pub fn finish_input(&mut self) -> Option<String> {
        match std::mem::take(&mut self.ui_state.input_mode) {
            InputMode::AddMusic { buffer } => Some(buffer),
            InputMode::Normal => None,
        }
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn hide_help_popup(&mut self) {
        self.ui_state.show_help_popup = false;
    }

    pub fn is_help_popup_open(&self) -> bool {
        self.ui_state.show_help_popup
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self, quit: bool) {
        self.should_quit = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ERROR_DISPLAY_DURATION;
    use std::time::Duration;

    fn model_with(count: usize) -> PlayerModel {
        let mut model = PlayerModel::new();
        model.append_tracks(
            (0..count)
                .map(|i| Track::new(format!("track {i}"), format!("/music/{i}.mp3")))
                .collect(),
        );
        model
    }

    #[test]
    fn next_and_prev_set_play_intent() {
        let mut model = model_with(3);
        let change = model.next_track();
        assert!(change.contains(StateChange::TRACK_INDEX | StateChange::PLAY_INTENT));
        assert_eq!(model.current_index(), 1);
        assert!(model.is_playing());

        // already playing: only the index changes
        assert_eq!(model.prev_track(), StateChange::TRACK_INDEX);
        assert_eq!(model.current_index(), 0);
    }

    #[test]
    fn single_track_navigation_is_a_no_op() {
        let mut model = model_with(1);
        assert!(model.next_track().is_empty());
        assert!(model.prev_track().is_empty());
        assert!(!model.is_playing());
    }

    #[test]
    fn reselecting_current_track_still_reports_track_change() {
        let mut model = model_with(2);
        let change = model.select_track(0).expect("index in range");
        assert!(change.contains(StateChange::TRACK_INDEX));
        assert!(model.is_playing());
        assert!(model.select_track(5).is_none());
    }

    #[test]
    fn append_clears_error_and_keeps_index() {
        let mut model = model_with(3);
        model.select_track(1);
        model.set_error("Please add a song first!");

        let change = model.append_tracks(vec![Track::new("new", "/music/new.mp3")]);
        assert_eq!(change, StateChange::PLAYLIST);
        assert_eq!(model.current_index(), 1);
        assert!(model.error().is_none());
    }

    #[test]
    fn empty_append_changes_nothing() {
        let mut model = model_with(0);
        model.set_error("still here");
        assert!(model.append_tracks(Vec::new()).is_empty());
        assert_eq!(model.error(), Some("still here"));
    }

    #[tokio::test(start_paused = true)]
    async fn new_error_restarts_display_window() {
        let mut model = model_with(0);
        model.set_error("first");
        tokio::time::advance(Duration::from_secs(2)).await;
        model.set_error("second");
        tokio::time::advance(Duration::from_secs(2)).await;

        model.auto_clear_expired_error();
        assert_eq!(model.error(), Some("second"));

        tokio::time::advance(ERROR_DISPLAY_DURATION).await;
        model.auto_clear_expired_error();
        assert!(model.error().is_none());
    }

    #[test]
    fn add_music_prompt_collects_input() {
        let mut model = model_with(0);
        model.begin_add_music();
        for c in "/tmp/x".chars() {
            model.append_to_input(c);
        }
        model.backspace_input();
        assert_eq!(model.finish_input().as_deref(), Some("/tmp/"));
        assert_eq!(model.input_mode(), &InputMode::Normal);
        assert!(model.finish_input().is_none());
    }
}
