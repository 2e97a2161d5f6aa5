//! Audio element backed by rodio
//!
//! The cpal output stream is not `Send`, so it lives on its own thread for the
//! whole session and only the handle is shared. Each `load()` decodes the bound
//! file on a blocking task into a fresh, paused sink.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tokio::sync::{oneshot, watch};

use super::load_ticket::{Drain, LoadTicket};
use super::{AudioElement, LoadSignals, MediaError};

const END_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Clone, Debug, PartialEq)]
enum LoadStatus {
    Empty,
    Loading,
    Loaded,
    Failed(MediaError),
}

pub struct RodioAudio {
    handle: OutputStreamHandle,
    source: Option<PathBuf>,
    sink: Arc<Mutex<Option<Arc<Sink>>>>,
    status: Arc<watch::Sender<LoadStatus>>,
    load_id: Arc<AtomicU64>,
    // f32 bits; read again when a load completes so a rate change made
    // while decoding still reaches the new sink
    rate: Arc<AtomicU32>,
    preserves_pitch: bool,
}

impl RodioAudio {
    /// Opens the default output device and keeps it alive on a dedicated thread.
    pub fn open() -> Result<Self, MediaError> {
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    let _stream = stream;
                    if tx.send(Ok(handle)).is_ok() {
                        loop {
                            std::thread::park();
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(MediaError::Output(e.to_string())));
                }
            })
            .map_err(|e| MediaError::Output(e.to_string()))?;

        let handle = rx
            .recv()
            .map_err(|_| MediaError::Output("audio thread exited".to_string()))??;

        tracing::info!("Audio output opened");
        Ok(Self {
            handle,
            source: None,
            sink: Arc::new(Mutex::new(None)),
            status: Arc::new(watch::Sender::new(LoadStatus::Empty)),
            load_id: Arc::new(AtomicU64::new(0)),
            rate: Arc::new(AtomicU32::new(1.0f32.to_bits())),
            preserves_pitch: true,
        })
    }

    fn current_sink(&self) -> Option<Arc<Sink>> {
        self.sink.lock().ok().and_then(|guard| guard.clone())
    }

    fn stop_current(&mut self) {
        let previous = self.sink.lock().ok().and_then(|mut guard| guard.take());
        if let Some(sink) = previous {
            sink.stop();
        }
    }
}

fn decode_into_sink(handle: &OutputStreamHandle, path: &Path) -> Result<Sink, MediaError> {
    let file = File::open(path).map_err(|e| MediaError::Io(e.to_string()))?;
    let decoder = Decoder::new(BufReader::new(file)).map_err(|e| MediaError::Decode(e.to_string()))?;
    let sink = Sink::try_new(handle).map_err(|e| MediaError::Output(e.to_string()))?;
    sink.pause();
    sink.append(decoder);
    Ok(sink)
}

/// Resolves `ended` once the sink drains, unless a newer load replaced it.
fn spawn_end_monitor(sink: Arc<Sink>, ticket: LoadTicket, ended: oneshot::Sender<()>) {
    tokio::spawn(async move {
        match ticket.wait_for_drain(END_POLL_INTERVAL, || sink.empty()).await {
            Drain::Finished => {
                tracing::debug!(load_id = ticket.id(), "Audio source drained");
                let _ = ended.send(());
            }
            Drain::Superseded => {}
        }
    });
}

impl AudioElement for RodioAudio {
    fn pause(&mut self) {
        if let Some(sink) = self.current_sink() {
            sink.pause();
        }
    }

    fn play(&mut self) -> BoxFuture<'static, Result<(), MediaError>> {
        let mut status = self.status.subscribe();
        let slot = self.sink.clone();

        Box::pin(async move {
            let outcome = {
                let settled = status
                    .wait_for(|s| *s != LoadStatus::Loading)
                    .await
                    .map_err(|_| MediaError::Output("audio element dropped".to_string()))?;
                LoadStatus::clone(&settled)
            };

            match outcome {
                LoadStatus::Loaded => {
                    let sink = slot.lock().ok().and_then(|guard| guard.clone());
                    match sink {
                        Some(sink) => {
                            sink.play();
                            Ok(())
                        }
                        None => Err(MediaError::NoSource),
                    }
                }
                LoadStatus::Failed(e) => Err(e),
                LoadStatus::Empty | LoadStatus::Loading => Err(MediaError::NoSource),
            }
        })
    }

    fn set_source(&mut self, locator: &str) {
        self.source = Some(PathBuf::from(locator));
    }

    fn load(&mut self) -> LoadSignals {
        let ticket = LoadTicket::issue(&self.load_id);
        self.stop_current();

        let (ready_tx, ready) = oneshot::channel();
        let (ended_tx, ended) = oneshot::channel();
        let Some(path) = self.source.clone() else {
            self.status.send_replace(LoadStatus::Empty);
            let _ = ready_tx.send(Err(MediaError::NoSource));
            return LoadSignals { ready, ended };
        };
        self.status.send_replace(LoadStatus::Loading);

        let handle = self.handle.clone();
        let rate = self.rate.clone();
        let slot = self.sink.clone();
        let status = self.status.clone();

        tokio::spawn(async move {
            let decode_path = path.clone();
            let result = tokio::task::spawn_blocking(move || decode_into_sink(&handle, &decode_path))
                .await
                .unwrap_or_else(|e| Err(MediaError::Output(e.to_string())));

            // The ticket check and the status update share the slot lock with
            // `stop_current`, so a newer load can never be overwritten.
            let Ok(mut guard) = slot.lock() else {
                return;
            };
            if !ticket.is_current() {
                tracing::trace!(load_id = ticket.id(), "Discarding superseded load");
                return;
            }

            match result {
                Ok(sink) => {
                    let sink = Arc::new(sink);
                    sink.set_speed(f32::from_bits(rate.load(Ordering::SeqCst)));
                    *guard = Some(sink.clone());
                    status.send_replace(LoadStatus::Loaded);
                    drop(guard);

                    spawn_end_monitor(sink, ticket, ended_tx);
                    let _ = ready_tx.send(Ok(()));
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "Audio load failed");
                    status.send_replace(LoadStatus::Failed(e.clone()));
                    drop(guard);

                    let _ = ready_tx.send(Err(e));
                }
            }
        });

        LoadSignals { ready, ended }
    }

    fn set_playback_rate(&mut self, rate: f32) {
        if let Ok(guard) = self.sink.lock() {
            self.rate.store(rate.to_bits(), Ordering::SeqCst);
            if let Some(sink) = guard.as_ref() {
                sink.set_speed(rate);
            }
        }
    }

    fn playback_rate(&self) -> f32 {
        f32::from_bits(self.rate.load(Ordering::SeqCst))
    }

    // rodio changes speed by resampling, so pitch always follows the rate;
    // the flag is kept so the element reports what it was asked for.
    fn set_preserves_pitch(&mut self, preserve: bool) {
        if !preserve && self.preserves_pitch {
            tracing::debug!("Pitch will follow playback rate");
        }
        self.preserves_pitch = preserve;
    }

    fn preserves_pitch(&self) -> bool {
        self.preserves_pitch
    }
}
