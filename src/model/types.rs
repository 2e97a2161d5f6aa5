//! Core type definitions for the player

use std::ops::{BitOr, BitOrAssign};
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;

/// How long a transient error stays on screen before it clears itself
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// A playable audio item
///
/// `url` is minted by whoever handed us the file; the player never persists
/// or revokes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub url: String,
}

impl Track {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Display label for a file: the file name without its last extension
    pub fn display_name(path: &Path) -> String {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}

/// Set of state slices touched by a model mutation.
///
/// Media reconciliation subscribes to specific slices instead of re-running
/// on every change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateChange(u8);

impl StateChange {
    pub const NONE: Self = Self(0);
    pub const PLAYLIST: Self = Self(1 << 0);
    pub const TRACK_INDEX: Self = Self(1 << 1);
    pub const PLAY_INTENT: Self = Self(1 << 2);
    pub const MODE: Self = Self(1 << 3);

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for StateChange {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for StateChange {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A user-visible message with a fixed expiry
#[derive(Clone, Debug)]
pub struct TransientError {
    pub message: String,
    pub expires_at: Instant,
}

impl TransientError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ERROR_DISPLAY_DURATION,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// What the keyboard is currently driving
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a file or directory path to add to the playlist
    AddMusic { buffer: String },
}

/// UI state for the player surface
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub selected: usize,
    pub input_mode: InputMode,
    pub show_help_popup: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_only_last_extension() {
        assert_eq!(Track::display_name(Path::new("/music/song.mp3")), "song");
        assert_eq!(Track::display_name(Path::new("live.at.home.flac")), "live.at.home");
        assert_eq!(Track::display_name(Path::new("no_extension")), "no_extension");
    }

    #[test]
    fn state_change_combines_slices() {
        let change = StateChange::TRACK_INDEX | StateChange::PLAY_INTENT;
        assert!(change.contains(StateChange::TRACK_INDEX));
        assert!(change.intersects(StateChange::PLAY_INTENT | StateChange::MODE));
        assert!(!change.intersects(StateChange::MODE | StateChange::PLAYLIST));
        assert!(StateChange::NONE.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_error_expires_after_display_duration() {
        let error = TransientError::new("boom");
        assert!(!error.is_expired());

        tokio::time::advance(ERROR_DISPLAY_DURATION - Duration::from_millis(1)).await;
        assert!(!error.is_expired());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(error.is_expired());
    }
}
