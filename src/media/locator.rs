//! Converts user-selected files into playable tracks

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::Track;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "flac", "wav", "ogg", "oga", "m4a", "aac", "opus"];

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Mints the locator the audio element opens: the canonical path of the file.
fn mint_locator(path: &Path) -> io::Result<String> {
    let canonical = fs::canonicalize(path)?;
    // make sure the bytes are actually readable before handing the track out
    fs::File::open(&canonical)?;
    Ok(canonical.to_string_lossy().into_owned())
}

/// Audio files directly inside `dir`, sorted by name
fn audio_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_audio_file(path))
        .collect();
    files.sort();
    Ok(files)
}

/// Builds tracks for the given files and directories, in the order given.
///
/// Directories contribute their audio files (not recursively). Paths that
/// cannot be read are skipped with a warning.
pub fn tracks_from_paths(paths: &[PathBuf]) -> Vec<Track> {
    let mut tracks = Vec::new();

    for path in paths {
        let files = if path.is_dir() {
            match audio_files_in(path) {
                Ok(files) => files,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Could not read directory");
                    continue;
                }
            }
        } else {
            vec![path.clone()]
        };

        for file in files {
            match mint_locator(&file) {
                Ok(url) => tracks.push(Track::new(Track::display_name(&file), url)),
                Err(e) => tracing::warn!(path = %file.display(), error = %e, "Skipping unreadable file"),
            }
        }
    }

    tracing::debug!(requested = paths.len(), added = tracks.len(), "Resolved tracks from paths");
    tracks
}
