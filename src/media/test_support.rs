//! Recording media elements for tests

use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use tokio::sync::oneshot;

use super::{AudioElement, LoadSignals, MediaError, VideoAssets, VideoElement};

#[derive(Clone, Debug, PartialEq)]
pub enum AudioOp {
    Pause,
    Play,
    SetSource(String),
    Load,
    SetRate(f32),
    SetPitch(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VideoOp {
    SetSource(String),
    Play,
    Pause,
}

pub fn test_assets() -> VideoAssets {
    VideoAssets {
        normal: "/assets/normal.mp4".to_string(),
        nightcore: "/assets/nightcore.mp4".to_string(),
    }
}

struct AudioInner {
    ops: Vec<AudioOp>,
    pending: Vec<Option<oneshot::Sender<Result<(), MediaError>>>>,
    endings: Vec<Option<oneshot::Sender<()>>>,
    reject_play: bool,
    rate: f32,
    preserves_pitch: bool,
}

/// Audio element that records every call; clones share the same record.
#[derive(Clone)]
pub struct MockAudio {
    inner: Arc<Mutex<AudioInner>>,
}

impl MockAudio {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AudioInner {
                ops: Vec::new(),
                pending: Vec::new(),
                endings: Vec::new(),
                reject_play: false,
                rate: 1.0,
                preserves_pitch: true,
            })),
        }
    }

    pub fn ops(&self) -> Vec<AudioOp> {
        self.inner.lock().unwrap().ops.clone()
    }

    pub fn clear_ops(&self) {
        self.inner.lock().unwrap().ops.clear();
    }

    pub fn reject_play(&self, reject: bool) {
        self.inner.lock().unwrap().reject_play = reject;
    }

    pub fn rate(&self) -> f32 {
        self.inner.lock().unwrap().rate
    }

    pub fn pitch_preserved(&self) -> bool {
        self.inner.lock().unwrap().preserves_pitch
    }

    pub fn load_count(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Completes the `nth` load (0-based, in call order).
    pub fn fire_ready(&self, nth: usize, result: Result<(), MediaError>) {
        let sender = self.inner.lock().unwrap().pending.get_mut(nth).and_then(Option::take);
        if let Some(sender) = sender {
            let _ = sender.send(result);
        }
    }

    /// Plays the `nth` load to its end.
    pub fn fire_ended(&self, nth: usize) {
        let sender = self.inner.lock().unwrap().endings.get_mut(nth).and_then(Option::take);
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }

    fn record(&self, op: AudioOp) {
        self.inner.lock().unwrap().ops.push(op);
    }
}

impl AudioElement for MockAudio {
    fn pause(&mut self) {
        self.record(AudioOp::Pause);
    }

    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>> {
        self.record(AudioOp::Play);
        let reject = self.inner.lock().unwrap().reject_play;
        Box::pin(async move {
            if reject {
                Err(MediaError::Rejected("not allowed".into()))
            } else {
                Ok(())
            }
        })
    }

    fn set_source(&mut self, locator: &str) {
        self.record(AudioOp::SetSource(locator.to_string()));
    }

    fn load(&mut self) -> LoadSignals {
        self.record(AudioOp::Load);
        let (ready_tx, ready) = oneshot::channel();
        let (ended_tx, ended) = oneshot::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.pending.push(Some(ready_tx));
        inner.endings.push(Some(ended_tx));
        LoadSignals { ready, ended }
    }

    fn set_playback_rate(&mut self, rate: f32) {
        self.record(AudioOp::SetRate(rate));
        self.inner.lock().unwrap().rate = rate;
    }

    fn playback_rate(&self) -> f32 {
        self.rate()
    }

    fn set_preserves_pitch(&mut self, preserve: bool) {
        self.record(AudioOp::SetPitch(preserve));
        self.inner.lock().unwrap().preserves_pitch = preserve;
    }

    fn preserves_pitch(&self) -> bool {
        self.pitch_preserved()
    }
}

#[derive(Default)]
struct VideoInner {
    ops: Vec<VideoOp>,
    source: Option<String>,
    reject_play: bool,
}

#[derive(Clone, Default)]
pub struct MockVideo {
    inner: Arc<Mutex<VideoInner>>,
    // mirrors inner.source so `source()` can hand out a borrow
    source: Option<String>,
}

impl MockVideo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<VideoOp> {
        self.inner.lock().unwrap().ops.clone()
    }

    pub fn current_source(&self) -> Option<String> {
        self.inner.lock().unwrap().source.clone()
    }

    pub fn reject_play(&self, reject: bool) {
        self.inner.lock().unwrap().reject_play = reject;
    }
}

impl VideoElement for MockVideo {
    fn set_source(&mut self, locator: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.push(VideoOp::SetSource(locator.to_string()));
        inner.source = Some(locator.to_string());
        self.source = Some(locator.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>> {
        let mut inner = self.inner.lock().unwrap();
        inner.ops.push(VideoOp::Play);
        let reject = inner.reject_play;
        Box::pin(async move {
            if reject {
                Err(MediaError::Rejected("autoplay policy".into()))
            } else {
                Ok(())
            }
        })
    }

    fn pause(&mut self) {
        self.inner.lock().unwrap().ops.push(VideoOp::Pause);
    }
}
