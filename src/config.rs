//! Startup configuration: JSON config file plus command-line overrides

use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::media::VideoAssets;

const DEFAULT_CONFIG_FILE: &str = ".config/nightcore-player.json";

pub const HELP: &str = "\
nightcore-player - terminal audio player with a nightcore mode

USAGE:
  nightcore-player [OPTIONS] [FILES_OR_DIRS...]

OPTIONS:
  --config <PATH>           Config file (default: .config/nightcore-player.json)
  --normal-video <PATH>     Ambience video for normal mode
  --nightcore-video <PATH>  Ambience video for nightcore mode
  -h, --help                Print this help
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub normal_video: PathBuf,
    pub nightcore_video: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            normal_video: PathBuf::from("assets/ambience.mp4"),
            nightcore_video: PathBuf::from("assets/ambience-nightcore.mp4"),
            log_dir: PathBuf::from(".logs"),
        }
    }
}

impl PlayerConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(path) = &args.normal_video {
            self.normal_video = path.clone();
        }
        if let Some(path) = &args.nightcore_video {
            self.nightcore_video = path.clone();
        }
    }

    pub fn video_assets(&self) -> VideoAssets {
        VideoAssets {
            normal: self.normal_video.to_string_lossy().into_owned(),
            nightcore: self.nightcore_video.to_string_lossy().into_owned(),
        }
    }
}

fn path_arg(value: &OsStr) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub help: bool,
    pub config: PathBuf,
    pub normal_video: Option<PathBuf>,
    pub nightcore_video: Option<PathBuf>,
    /// Files or directories to start the playlist with
    pub files: Vec<PathBuf>,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::parse(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self> {
        Self::parse(pico_args::Arguments::from_vec(args))
    }

    fn parse(mut args: pico_args::Arguments) -> Result<Self> {
        let help = args.contains(["-h", "--help"]);
        let config = args
            .opt_value_from_os_str("--config", path_arg)?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let normal_video = args.opt_value_from_os_str("--normal-video", path_arg)?;
        let nightcore_video = args.opt_value_from_os_str("--nightcore-video", path_arg)?;

        let files = args.finish().into_iter().map(PathBuf::from).collect();

        Ok(Self {
            help,
            config,
            normal_video,
            nightcore_video,
            files,
        })
    }
}
