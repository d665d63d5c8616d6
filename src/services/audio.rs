//! Audio playback service

use std::{
    io::{self, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound asset not found: {0}")]
    NotFound(PathBuf),
    #[error("sound asset is empty: {0}")]
    Empty(PathBuf),
    #[error("failed to read sound asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("playback failed: {0}")]
    Playback(String),
}

/// Completion callback for a single playback
pub type PlaybackCallback = Box<dyn FnOnce(Result<(), AudioError>) + Send + 'static>;

/// A loaded sound
pub trait Sound: Send + Sync {
    /// Human readable details of the loaded asset, for logging
    fn describe(&self) -> String;

    /// Play from the current position; `on_end` reports how playback finished
    fn play(&self, on_end: PlaybackCallback);

    /// Stop playback and rewind to the start
    fn stop(&self);
}

/// Loads sounds by asset name
pub trait AudioPlayer: Send + Sync {
    fn load(&self, name: &str) -> Result<Arc<dyn Sound>, AudioError>;
}

/// Audio player resolving names against an assets directory.
///
/// Playback rings the terminal bell.
#[derive(Debug, Clone)]
pub struct AssetAudioPlayer {
    assets_dir: PathBuf,
}

impl AssetAudioPlayer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }
}

impl AudioPlayer for AssetAudioPlayer {
    fn load(&self, name: &str) -> Result<Arc<dyn Sound>, AudioError> {
        let path = self.assets_dir.join(name);
        let metadata = std::fs::metadata(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AudioError::NotFound(path.clone()),
            _ => AudioError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        if metadata.len() == 0 {
            return Err(AudioError::Empty(path));
        }

        debug!("Loaded sound asset {}", path.display());
        Ok(Arc::new(BellSound {
            name: name.to_string(),
            size_bytes: metadata.len(),
            playing: AtomicBool::new(false),
        }))
    }
}

#[derive(Debug)]
struct BellSound {
    name: String,
    size_bytes: u64,
    playing: AtomicBool,
}

impl Sound for BellSound {
    fn describe(&self) -> String {
        format!("{} ({} bytes)", self.name, self.size_bytes)
    }

    fn play(&self, on_end: PlaybackCallback) {
        self.playing.store(true, Ordering::SeqCst);

        let mut out = io::stdout();
        let result = write!(out, "\x07")
            .and_then(|_| out.flush())
            .map_err(|e| AudioError::Playback(e.to_string()));

        self.playing.store(false, Ordering::SeqCst);
        on_end(result);
    }

    fn stop(&self) {
        if self.playing.swap(false, Ordering::SeqCst) {
            debug!("Stopped {}", self.name);
        }
        debug!("Rewound {}", self.name);
    }
}
