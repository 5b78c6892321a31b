// ABOUTME: Media handling for the review step
// In-memory blob store for merged clips, asset lookup, the transcoder capability,
// audio/video muxing and the audio-follows-video sync model

pub mod assets;
pub mod muxer;
pub mod sync;
pub mod transcoder;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub use assets::AssetStore;
pub use muxer::{mux_args, Muxer};
pub use sync::{AvSync, MediaElement};
pub use transcoder::{FfmpegTranscoder, Transcoder};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not available")]
    EngineUnavailable,

    #[error("FFmpeg init failed: {0}")]
    EngineLoad(String),

    #[error("Could not load {path}: {source}")]
    AssetFetch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("FFmpeg exited with {status}: {stderr}")]
    Exec { status: String, stderr: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("This trend has no audio track to merge")]
    NoAudioTrack,

    #[error("A merge is already running")]
    MergeInFlight,

    #[error("Unknown media handle {0}")]
    UnknownHandle(MediaHandle),
}

/// Opaque reference to a blob held by [`MediaStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaHandle(Uuid);

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media://{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct MediaBlob {
    pub bytes: Vec<u8>,
    pub download_name: String,
}

/// Owner of generated media. A handle stays valid until released; release
/// drops the bytes.
#[derive(Debug, Default)]
pub struct MediaStore {
    blobs: HashMap<MediaHandle, MediaBlob>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, bytes: Vec<u8>, download_name: &str) -> MediaHandle {
        let handle = MediaHandle(Uuid::new_v4());
        info!("Created {} ({} bytes, {})", handle, bytes.len(), download_name);
        self.blobs.insert(
            handle,
            MediaBlob {
                bytes,
                download_name: download_name.to_string(),
            },
        );
        handle
    }

    /// Returns false when the handle was already released
    pub fn release(&mut self, handle: MediaHandle) -> bool {
        let released = self.blobs.remove(&handle).is_some();
        debug!("Released {} (was live: {})", handle, released);
        released
    }

    pub fn get(&self, handle: MediaHandle) -> Option<&MediaBlob> {
        self.blobs.get(&handle)
    }

    pub fn is_live(&self, handle: MediaHandle) -> bool {
        self.blobs.contains_key(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.blobs.len()
    }

    /// Write the blob into `dir` under its download name
    pub fn export(&self, handle: MediaHandle, dir: &Path) -> Result<PathBuf, MediaError> {
        let blob = self.get(handle).ok_or(MediaError::UnknownHandle(handle))?;
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&blob.download_name);
        std::fs::write(&path, &blob.bytes)?;
        info!("Exported {} to {}", handle, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_release() {
        let mut store = MediaStore::new();
        let handle = store.create(vec![0, 1, 2], "merged.mp4");
        assert!(store.is_live(handle));
        assert_eq!(store.get(handle).unwrap().bytes, vec![0, 1, 2]);

        assert!(store.release(handle));
        assert!(!store.release(handle));
        assert!(store.get(handle).is_none());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_export_writes_download_name() {
        let dir = TempDir::new().unwrap();
        let mut store = MediaStore::new();
        let handle = store.create(b"mp4".to_vec(), "merged_labubu.mp4");

        let path = store.export(handle, dir.path()).unwrap();
        assert_eq!(path, dir.path().join("merged_labubu.mp4"));
        assert_eq!(std::fs::read(path).unwrap(), b"mp4");
    }

    #[test]
    fn test_export_released_handle_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = MediaStore::new();
        let handle = store.create(vec![1], "x.mp4");
        store.release(handle);
        assert!(matches!(
            store.export(handle, dir.path()),
            Err(MediaError::UnknownHandle(_))
        ));
    }
}
