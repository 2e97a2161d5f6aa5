//! Decorative looping "video" for the terminal
//!
//! The terminal can't show the asset itself, so the element only checks that
//! it exists and drives an animation clock the view renders as the vibe window.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, BoxFuture};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{MediaError, VideoElement};

const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// What the vibe window should draw
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmbientFrame {
    pub asset: Option<String>,
    pub playing: bool,
    pub frame: u64,
}

pub struct AmbientVideo {
    source: Option<String>,
    frames: Arc<watch::Sender<AmbientFrame>>,
    ticker: Option<JoinHandle<()>>,
}

impl AmbientVideo {
    pub fn new() -> Self {
        Self {
            source: None,
            frames: Arc::new(watch::Sender::new(AmbientFrame::default())),
            ticker: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<AmbientFrame> {
        self.frames.subscribe()
    }

    fn start_ticker(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        let frames = self.frames.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_INTERVAL);
            loop {
                interval.tick().await;
                frames.send_modify(|f| f.frame = f.frame.wrapping_add(1));
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Default for AmbientVideo {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AmbientVideo {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

impl VideoElement for AmbientVideo {
    fn set_source(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
        self.frames.send_modify(|f| {
            f.asset = Some(locator.to_string());
            f.frame = 0;
        });
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>> {
        let result = match &self.source {
            None => Err(MediaError::NoSource),
            Some(source) if !Path::new(source).exists() => {
                Err(MediaError::Rejected(format!("{source} does not exist")))
            }
            Some(_) => {
                self.start_ticker();
                self.frames.send_modify(|f| f.playing = true);
                Ok(())
            }
        };
        Box::pin(future::ready(result))
    }

    fn pause(&mut self) {
        self.stop_ticker();
        self.frames.send_modify(|f| f.playing = false);
    }
}
