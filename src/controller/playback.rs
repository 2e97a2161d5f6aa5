//! Transport actions

use std::path::PathBuf;

use crate::media::{tracks_from_paths, LoadState};
use crate::model::{PlayerModel, Track};

use super::{PlayerController, ADD_TRACK_FIRST, NO_AUDIO_FOUND, PLAYBACK_FAILED};

impl PlayerController {
    pub async fn play_pause(&self) {
        let mut model = self.model.lock().await;

        if !model.has_tracks() {
            tracing::debug!("Play requested with an empty playlist");
            model.set_error(ADD_TRACK_FIRST);
            return;
        }

        if model.is_playing() {
            self.media.lock().await.pause_audio();
            let change = model.set_playing(false);
            self.reconcile(&model, change).await;
            tracing::info!(action = "paused", "Playback toggled");
            return;
        }

        let play = {
            let mut media = self.media.lock().await;
            if media.load_state() == LoadState::Loading {
                // The ready handler starts the track; waiting here would hold
                // the model lock for the whole decode.
                drop(media);
                let change = model.set_playing(true);
                self.reconcile(&model, change).await;
                tracing::info!(action = "queued", "Playback toggled");
                return;
            }
            media.play_audio()
        };
        match play.await {
            Ok(()) => {
                let change = model.set_playing(true);
                self.reconcile(&model, change).await;
                tracing::info!(action = "resumed", "Playback toggled");
            }
            Err(e) => {
                tracing::error!(error = %e, track = ?model.current_track().map(|t| &t.name), "Playback failed");
                model.set_error(PLAYBACK_FAILED);
            }
        }
    }

    pub async fn next_track(&self) {
        let mut model = self.model.lock().await;
        self.advance(&mut model).await;
    }

    /// Moves to the next track under an already held model lock.
    pub(crate) async fn advance(&self, model: &mut PlayerModel) {
        let change = model.next_track();
        if change.is_empty() {
            tracing::debug!(tracks = model.track_count(), "Next ignored");
            return;
        }
        tracing::info!(index = model.current_index(), "Skipped to next track");
        self.reconcile(model, change).await;
    }

    pub async fn previous_track(&self) {
        let mut model = self.model.lock().await;
        let change = model.prev_track();
        if change.is_empty() {
            tracing::debug!(tracks = model.track_count(), "Previous ignored");
            return;
        }
        tracing::info!(index = model.current_index(), "Skipped to previous track");
        self.reconcile(&model, change).await;
    }

    /// Plays the track at `index`, reloading it even if it is already current.
    pub async fn select_track(&self, index: usize) {
        let mut model = self.model.lock().await;
        let Some(change) = model.select_track(index) else {
            tracing::warn!(index, tracks = model.track_count(), "Track index out of range");
            return;
        };
        tracing::info!(index, "Track selected");
        self.reconcile(&model, change).await;
    }

    /// Plays whatever the playlist cursor points at.
    pub async fn play_selected(&self) {
        let index = self.model.lock().await.selected_index();
        self.select_track(index).await;
    }

    pub async fn toggle_nightcore(&self) {
        let mut model = self.model.lock().await;
        let change = model.toggle_nightcore();
        let mode = model.mode();
        tracing::info!(nightcore = mode.is_nightcore, rate = mode.playback_rate(), "Mode toggled");
        self.reconcile(&model, change).await;
    }

    pub async fn append_tracks(&self, tracks: Vec<Track>) {
        let mut model = self.model.lock().await;
        let added = tracks.len();
        let change = model.append_tracks(tracks);
        if change.is_empty() {
            return;
        }
        tracing::info!(added, total = model.track_count(), "Tracks appended");
        self.reconcile(&model, change).await;
    }

    /// Adds the audio files found at `paths` to the end of the playlist.
    pub async fn add_tracks(&self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        let tracks = tracks_from_paths(&paths);
        if tracks.is_empty() {
            self.model.lock().await.set_error(NO_AUDIO_FOUND);
            return;
        }
        self.append_tracks(tracks).await;
    }

    /// End of media: advance with wraparound.
    pub async fn on_track_ended(&self) {
        tracing::debug!("Track ended, advancing");
        self.next_track().await;
    }
}
