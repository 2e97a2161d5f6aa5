//! Ordered track list with a current-index pointer

use super::types::Track;

#[derive(Clone, Debug, Default)]
pub struct PlaylistState {
    tracks: Vec<Track>,
    current_index: usize,
}

impl PlaylistState {
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Meaningless while the playlist is empty.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Appends in insertion order. Returns false when there was nothing to add.
    pub fn append(&mut self, new_tracks: Vec<Track>) -> bool {
        if new_tracks.is_empty() {
            return false;
        }
        self.tracks.extend(new_tracks);
        true
    }

    /// Returns false (leaving the index alone) when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Steps forward with wraparound. A playlist of one or zero tracks does not move.
    pub fn advance(&mut self) -> bool {
        let len = self.tracks.len();
        if len <= 1 {
            return false;
        }
        self.current_index = (self.current_index + 1) % len;
        true
    }

    pub fn retreat(&mut self) -> bool {
        let len = self.tracks.len();
        if len <= 1 {
            return false;
        }
        self.current_index = (self.current_index + len - 1) % len;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(count: usize) -> PlaylistState {
        let mut playlist = PlaylistState::default();
        playlist.append(
            (0..count)
                .map(|i| Track::new(format!("track {i}"), format!("/music/{i}.mp3")))
                .collect(),
        );
        playlist
    }

    #[test]
    fn advance_and_retreat_wrap_around() {
        let mut playlist = playlist(3);
        playlist.select(2);
        assert!(playlist.advance());
        assert_eq!(playlist.current_index(), 0);

        assert!(playlist.retreat());
        assert_eq!(playlist.current_index(), 2);
    }

    #[test]
    fn single_track_does_not_move() {
        let mut playlist = playlist(1);
        assert!(!playlist.advance());
        assert!(!playlist.retreat());
        assert_eq!(playlist.current_index(), 0);
    }

    #[test]
    fn append_keeps_position_and_allows_duplicates() {
        let mut playlist = playlist(2);
        playlist.select(1);
        let dup = playlist.tracks()[0].clone();
        assert!(playlist.append(vec![dup.clone(), dup]));
        assert_eq!(playlist.current_index(), 1);
        assert_eq!(playlist.len(), 4);
        assert!(!playlist.append(Vec::new()));
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut playlist = playlist(2);
        assert!(!playlist.select(2));
        assert_eq!(playlist.current_index(), 0);
        assert!(playlist.select(1));
        assert_eq!(playlist.current().map(|t| t.name.as_str()), Some("track 1"));
    }

    #[test]
    fn index_stays_in_range_through_mixed_operations() {
        let mut playlist = playlist(0);
        for step in 0..40usize {
            match step % 5 {
                0 => {
                    playlist.append(vec![Track::new("x", "/x.mp3")]);
                }
                1 | 2 => {
                    playlist.advance();
                }
                3 => {
                    playlist.retreat();
                }
                _ => {
                    playlist.select(step % (playlist.len() + 1));
                }
            }
            if !playlist.is_empty() {
                assert!(playlist.current_index() < playlist.len());
            }
        }
    }
}
