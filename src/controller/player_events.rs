//! Media event listener: ready-to-play, load failures and end of track

use tokio::sync::mpsc;

use crate::media::MediaEvent;
use super::{PlayerController, PLAYBACK_FAILED};

impl PlayerController {
    pub fn start_media_event_listener(&self, mut events: mpsc::UnboundedReceiver<MediaEvent>) {
        let controller = self.clone();
        tracing::info!("Starting media event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if controller.model.lock().await.should_quit() {
                    tracing::debug!("Media event listener shutting down");
                    break;
                }
                controller.handle_media_event(event).await;
            }
        });
    }

    pub async fn handle_media_event(&self, event: MediaEvent) {
        match event {
            MediaEvent::AudioReady { generation } => {
                let model = self.model.lock().await;
                let mut media = self.media.lock().await;
                if !media.accept_ready(generation) {
                    tracing::debug!(generation, current = media.generation(), "Ignoring ready from superseded track");
                    return;
                }
                tracing::debug!(generation, is_playing = model.is_playing(), "MediaEvent::AudioReady");

                if model.is_playing() {
                    let play = media.play_audio();
                    if let Err(e) = play.await {
                        // not a direct user gesture; the user can press play again
                        tracing::warn!(error = %e, "Autoplay blocked, user interaction required");
                    }
                }
            }
            MediaEvent::AudioLoadFailed { generation, error } => {
                let mut model = self.model.lock().await;
                let mut media = self.media.lock().await;
                if !media.accept_load_failure(generation) {
                    tracing::debug!(generation, "Ignoring load failure from superseded track");
                    return;
                }
                tracing::error!(
                    generation,
                    error = %error,
                    track = ?model.current_track().map(|t| &t.name),
                    "MediaEvent::AudioLoadFailed"
                );
                model.set_error(PLAYBACK_FAILED);
            }
            MediaEvent::AudioEnded { generation } => {
                let mut model = self.model.lock().await;
                if !self.media.lock().await.is_current(generation) {
                    tracing::debug!(generation, "Ignoring end of superseded track");
                    return;
                }
                tracing::debug!(generation, "MediaEvent::AudioEnded");
                self.advance(&mut model).await;
            }
        }
    }
}
