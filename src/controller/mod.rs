//! Controller module - Player logic and event handling
//!
//! This module contains the player controller that handles user input,
//! applies transport actions to the model, and hands every resulting change
//! to the media binding before the next action is processed.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Transport actions (play/pause, next/prev, select, mode, add)
//! - `player_events`: Media event listener (ready-to-play, load failure, end of track)

mod input;
mod playback;
mod player_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::media::MediaBinding;
use crate::model::{PlayerModel, StateChange};

pub(crate) const ADD_TRACK_FIRST: &str = "Please add a song first!";
pub(crate) const PLAYBACK_FAILED: &str = "Could not play this file.";
pub(crate) const NO_AUDIO_FOUND: &str = "No playable audio files found.";

#[derive(Clone)]
pub struct PlayerController {
    pub(crate) model: Arc<Mutex<PlayerModel>>,
    pub(crate) media: Arc<Mutex<MediaBinding>>,
}

impl PlayerController {
    pub fn new(model: Arc<Mutex<PlayerModel>>, media: Arc<Mutex<MediaBinding>>) -> Self {
        Self { model, media }
    }

    /// Runs the media effects for `change`.
    ///
    /// Callers hold the model lock, so no other action can slip in between a
    /// state change and its reconciliation.
    pub(crate) async fn reconcile(&self, model: &PlayerModel, change: StateChange) {
        if change.is_empty() {
            return;
        }
        let state = model.binding_state();
        self.media.lock().await.reconcile(change, &state).await;
    }
}
