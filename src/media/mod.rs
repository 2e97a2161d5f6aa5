//! Media module - audio/video elements and the binding that drives them
//!
//! - `binding`: Keeps both elements consistent with the player model
//! - `locator`: Turns selected files into playable tracks
//! - `rodio_audio`: Audio element backed by a rodio output stream
//! - `load_ticket`: Tells the live load of an element apart from retired ones
//! - `ambient_video`: Decorative looping "video" for the terminal surface

mod binding;
mod locator;
mod rodio_audio;
mod load_ticket;
mod ambient_video;

#[cfg(test)]
pub(crate) mod test_support;

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use crate::model::ModeState;

pub use binding::{LoadState, MediaBinding};
pub use locator::tracks_from_paths;
pub use rodio_audio::RodioAudio;
pub use ambient_video::{AmbientFrame, AmbientVideo};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("play request rejected: {0}")]
    Rejected(String),
    #[error("no source bound")]
    NoSource,
    #[error("could not decode media: {0}")]
    Decode(String),
    #[error("i/o error: {0}")]
    Io(String),
    #[error("audio output error: {0}")]
    Output(String),
}

/// Resolves once when the loaded source can start playing, or with the
/// reason it never will.
pub type ReadySignal = oneshot::Receiver<Result<(), MediaError>>;

/// Resolves when the loaded source plays to its end. Dropped unresolved when
/// the source is replaced first.
pub type EndSignal = oneshot::Receiver<()>;

/// What a `load()` hands back to the binding
pub struct LoadSignals {
    pub ready: ReadySignal,
    pub ended: EndSignal,
}

/// Notifications from the elements back to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    AudioReady { generation: u64 },
    AudioLoadFailed { generation: u64, error: MediaError },
    AudioEnded { generation: u64 },
}

pub trait AudioElement: Send {
    fn pause(&mut self);
    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>>;
    fn set_source(&mut self, locator: &str);
    /// Drops whatever was loaded and starts loading the bound source.
    fn load(&mut self) -> LoadSignals;
    fn set_playback_rate(&mut self, rate: f32);
    fn playback_rate(&self) -> f32;
    fn set_preserves_pitch(&mut self, preserve: bool);
    fn preserves_pitch(&self) -> bool;
}

pub trait VideoElement: Send {
    fn set_source(&mut self, locator: &str);
    fn source(&self) -> Option<&str>;
    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>>;
    fn pause(&mut self);
}

/// The two static background assets, fixed for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoAssets {
    pub normal: String,
    pub nightcore: String,
}

impl VideoAssets {
    pub fn for_mode(&self, mode: ModeState) -> &str {
        if mode.is_nightcore { &self.nightcore } else { &self.normal }
    }
}
