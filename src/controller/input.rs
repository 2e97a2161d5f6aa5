//! Key event handling

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::InputMode;
use super::PlayerController;

impl PlayerController {
    pub async fn handle_key_event(&self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let mut model = self.model.lock().await;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true);
            return;
        }

        // Add-music prompt captures all typing
        if matches!(model.input_mode(), InputMode::AddMusic { .. }) {
            match key.code {
                KeyCode::Enter => {
                    let input = model.finish_input().unwrap_or_default();
                    drop(model);
                    let input = input.trim();
                    if !input.is_empty() {
                        self.add_tracks(vec![PathBuf::from(input)]).await;
                    }
                }
                KeyCode::Esc => {
                    model.finish_input();
                }
                KeyCode::Backspace => model.backspace_input(),
                KeyCode::Char(c) => model.append_to_input(c),
                _ => {}
            }
            return;
        }

        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return;
        }

        if key.code == KeyCode::Esc && model.has_error() {
            model.clear_error();
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => model.set_should_quit(true),
            KeyCode::Char('h') | KeyCode::Char('H') => model.toggle_help_popup(),
            KeyCode::Char('a') | KeyCode::Char('A') => model.begin_add_music(),
            KeyCode::Up => model.move_selection_up(),
            KeyCode::Down => model.move_selection_down(),
            KeyCode::Char(' ') => {
                drop(model);
                self.play_pause().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Right => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Left => {
                drop(model);
                self.previous_track().await;
            }
            KeyCode::Char('z') | KeyCode::Char('Z') => {
                drop(model);
                self.toggle_nightcore().await;
            }
            KeyCode::Enter => {
                let has_tracks = model.has_tracks();
                drop(model);
                if has_tracks {
                    self.play_selected().await;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::controller::test_support::Harness;
    use crate::model::InputMode;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn add_music_prompt_appends_typed_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("opening.ogg"), b"ogg").unwrap();
        let harness = Harness::new();

        harness.controller.handle_key_event(press(KeyCode::Char('a'))).await;
        for c in dir.path().to_string_lossy().chars() {
            harness.controller.handle_key_event(press(KeyCode::Char(c))).await;
        }
        harness.controller.handle_key_event(press(KeyCode::Enter)).await;

        let model = harness.controller.model.lock().await;
        assert_eq!(model.input_mode(), &InputMode::Normal);
        assert_eq!(model.current_track().map(|t| t.name.as_str()), Some("opening"));
    }

    #[tokio::test]
    async fn prompt_swallows_transport_keys() {
        let harness = Harness::with_tracks(2).await;
        harness.controller.handle_key_event(press(KeyCode::Char('a'))).await;
        harness.controller.handle_key_event(press(KeyCode::Char('n'))).await;
        harness.controller.handle_key_event(press(KeyCode::Esc)).await;

        let model = harness.controller.model.lock().await;
        assert_eq!(model.current_index(), 0);
        assert_eq!(model.input_mode(), &InputMode::Normal);
    }

    #[tokio::test]
    async fn enter_plays_track_under_cursor() {
        let harness = Harness::with_tracks(3).await;
        harness.controller.handle_key_event(press(KeyCode::Down)).await;
        harness.controller.handle_key_event(press(KeyCode::Down)).await;
        harness.controller.handle_key_event(press(KeyCode::Enter)).await;

        let model = harness.controller.model.lock().await;
        assert_eq!(model.current_index(), 2);
        assert!(model.is_playing());
    }

    #[tokio::test]
    async fn esc_dismisses_error_early() {
        let harness = Harness::new();
        harness.controller.handle_key_event(press(KeyCode::Char(' '))).await;
        assert!(harness.controller.model.lock().await.has_error());

        harness.controller.handle_key_event(press(KeyCode::Esc)).await;
        assert!(!harness.controller.model.lock().await.has_error());
    }
}
