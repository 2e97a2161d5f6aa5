//! Model module - Player state and data types
//!
//! This module contains the data structures and state management for the player.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (tracks, change tags, transient errors, UI state)
//! - `playlist`: Ordered track list with the current-index pointer
//! - `playback`: Nightcore mode and the snapshots handed to media and view
//! - `app_model`: Main player model with state management methods

mod types;
mod playlist;
mod playback;
mod app_model;

pub use types::{InputMode, StateChange, Track, UiState, ERROR_DISPLAY_DURATION};

pub use playback::{BindingState, ModeState, PlaybackInfo};

pub use app_model::PlayerModel;
