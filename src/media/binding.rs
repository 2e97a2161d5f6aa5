//! Media binding: reconciles the audio and video elements with player state
//!
//! Each reconciliation receives the tags of the state slices that changed and
//! runs only the effects subscribed to them:
//!
//! - track swap on `TRACK_INDEX` or `PLAYLIST` (the latter only when the active
//!   track differs from the one bound)
//! - rate/pitch on `MODE`, `TRACK_INDEX` or `PLAYLIST`
//! - video on `PLAY_INTENT`, `MODE` or `TRACK_INDEX`
//!
//! A track swap bumps `generation`. The task waiting for the ready and end
//! signals is aborted on the next swap, and every event it sends carries its
//! generation. Events from older generations are rejected by `accept_ready`,
//! `accept_load_failure` and `is_current`, so only the latest bound track can
//! start playing or advance the playlist when it ends.

use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::model::{BindingState, StateChange};
use super::{AudioElement, MediaError, MediaEvent, VideoAssets, VideoElement};

const SWAP_TRIGGERS: StateChange = StateChange::PLAYLIST.union(StateChange::TRACK_INDEX);

/// Readiness of the bound audio source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NoTrack,
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct BoundTrack {
    index: usize,
    url: String,
}

pub struct MediaBinding {
    audio: Box<dyn AudioElement>,
    video: Box<dyn VideoElement>,
    assets: VideoAssets,
    events: mpsc::UnboundedSender<MediaEvent>,
    generation: u64,
    bound: Option<BoundTrack>,
    load_state: LoadState,
    signal_waiter: Option<JoinHandle<()>>,
}

impl MediaBinding {
    pub fn new(
        audio: Box<dyn AudioElement>,
        video: Box<dyn VideoElement>,
        assets: VideoAssets,
        events: mpsc::UnboundedSender<MediaEvent>,
    ) -> Self {
        Self {
            audio,
            video,
            assets,
            events,
            generation: 0,
            bound: None,
            load_state: LoadState::NoTrack,
            signal_waiter: None,
        }
    }

    pub async fn reconcile(&mut self, change: StateChange, state: &BindingState) {
        if change.is_empty() {
            return;
        }
        tracing::trace!(?change, index = state.current_index, "Reconciling media");

        if change.intersects(SWAP_TRIGGERS) && self.needs_swap(change, state) {
            self.swap_track(state);
        }
        if change.intersects(StateChange::MODE | SWAP_TRIGGERS) {
            self.apply_rate(state);
        }
        if change.intersects(StateChange::PLAY_INTENT | StateChange::MODE | StateChange::TRACK_INDEX) {
            self.reconcile_video(state).await;
        }
    }

    fn needs_swap(&self, change: StateChange, state: &BindingState) -> bool {
        let Some(track) = &state.current_track else {
            return false;
        };
        if change.contains(StateChange::TRACK_INDEX) {
            return true;
        }
        self.bound.as_ref() != Some(&BoundTrack { index: state.current_index, url: track.url.clone() })
    }

    fn swap_track(&mut self, state: &BindingState) {
        let Some(track) = &state.current_track else {
            return;
        };

        self.audio.pause();
        if let Some(waiter) = self.signal_waiter.take() {
            waiter.abort();
        }
        self.generation += 1;
        let generation = self.generation;

        tracing::info!(generation, index = state.current_index, track = %track.name, "Binding audio source");
        self.audio.set_source(&track.url);
        let signals = self.audio.load();
        self.bound = Some(BoundTrack { index: state.current_index, url: track.url.clone() });
        self.load_state = LoadState::Loading;

        let events = self.events.clone();
        self.signal_waiter = Some(tokio::spawn(async move {
            match signals.ready.await {
                Ok(Ok(())) => {
                    if events.send(MediaEvent::AudioReady { generation }).is_err() {
                        return;
                    }
                }
                Ok(Err(error)) => {
                    let _ = events.send(MediaEvent::AudioLoadFailed { generation, error });
                    return;
                }
                // element dropped the load; a newer swap owns it now
                Err(_) => return,
            }
            if signals.ended.await.is_ok() {
                let _ = events.send(MediaEvent::AudioEnded { generation });
            }
        }));
    }

    fn apply_rate(&mut self, state: &BindingState) {
        if state.current_track.is_none() {
            return;
        }
        let rate = state.mode.playback_rate();
        if self.audio.playback_rate() != rate {
            tracing::debug!(rate, "Setting playback rate");
            self.audio.set_playback_rate(rate);
        }
        let preserve = state.mode.preserves_pitch();
        if self.audio.preserves_pitch() != preserve {
            self.audio.set_preserves_pitch(preserve);
        }
    }

    async fn reconcile_video(&mut self, state: &BindingState) {
        let asset = self.assets.for_mode(state.mode);
        if self.video.source() != Some(asset) {
            tracing::debug!(asset, "Switching ambience video");
            self.video.set_source(asset);
        }

        if state.is_playing {
            if let Err(e) = self.video.play().await {
                tracing::trace!(error = %e, "Ambience video play ignored");
            }
        } else {
            self.video.pause();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Marks the current source ready. Returns false for a superseded swap.
    pub fn accept_ready(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.load_state = LoadState::Ready;
        true
    }

    pub fn accept_load_failure(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.signal_waiter = None;
        self.load_state = LoadState::Failed;
        true
    }

    pub fn play_audio(&mut self) -> BoxFuture<'static, Result<(), MediaError>> {
        self.audio.play()
    }

    pub fn pause_audio(&mut self) {
        self.audio.pause();
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
