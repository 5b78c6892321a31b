// ABOUTME: Read-only access to the static image/video/audio assets referenced by the catalog

use super::MediaError;
use std::path::{Path, PathBuf};

/// Resolves catalog asset paths such as `/ibiza_boss.mp4` against a root directory
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, asset: &str) -> PathBuf {
        self.root.join(asset.trim_start_matches('/'))
    }

    pub fn exists(&self, asset: &str) -> bool {
        self.resolve(asset).is_file()
    }

    pub async fn fetch(&self, asset: &str) -> Result<Vec<u8>, MediaError> {
        tokio::fs::read(self.resolve(asset))
            .await
            .map_err(|source| MediaError::AssetFetch {
                path: asset.to_string(),
                source,
            })
    }
}
