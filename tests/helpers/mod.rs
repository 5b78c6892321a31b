// ABOUTME: Shared fixtures for integration tests: deterministic app state and a scripted transcoder

#![allow(dead_code)]

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use trendify::app::AppState;
use trendify::config::AppConfig;
use trendify::media::{MediaError, Transcoder};
use trendify::timer::ManualClock;

/// Transcoder that returns fixed bytes, or fails on load when `fail` is set
#[derive(Debug, Default)]
pub struct FakeTranscoder {
    pub fail: bool,
}

#[async_trait]
impl Transcoder for FakeTranscoder {
    async fn load(&mut self) -> Result<(), MediaError> {
        if self.fail {
            return Err(MediaError::EngineUnavailable);
        }
        Ok(())
    }

    async fn write_file(&mut self, _name: &str, _data: Vec<u8>) -> Result<(), MediaError> {
        Ok(())
    }

    async fn exec(&mut self, _args: Vec<String>) -> Result<(), MediaError> {
        Ok(())
    }

    async fn read_file(&mut self, _name: &str) -> Result<Vec<u8>, MediaError> {
        Ok(b"merged-mp4".to_vec())
    }
}

/// Asset directory holding every clip and audio track of the catalog
pub fn asset_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in [
        "apple_tungtung.mp4",
        "apple_tungtung.mp3",
        "ibiza_boss.mp4",
        "ibiza_boss.mp3",
        "tesla_okgarmin.mp4",
        "tesla_okgarmin.mp3",
        "starbucks_labubu.mp4",
    ] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }
    dir
}

pub struct Harness {
    pub clock: ManualClock,
    pub state: AppState,
    pub assets: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), FakeTranscoder::default())
    }

    pub fn with_config(mut config: AppConfig, engine: FakeTranscoder) -> Self {
        let assets = asset_dir();
        config.media.assets_dir = assets.path().to_path_buf();
        config.media.export_dir = assets.path().join("exports");
        let clock = ManualClock::new();
        let state = AppState::new(
            config,
            Arc::new(clock.clone()),
            StdRng::seed_from_u64(7),
            Box::new(engine),
        );
        Self {
            clock,
            state,
            assets,
        }
    }

    /// Advance simulated time in tick-sized steps
    pub fn run_for(&mut self, ms: u64) {
        for _ in 0..(ms / 50) {
            self.clock.advance(Duration::from_millis(50));
            self.state.tick();
        }
    }

    /// Wait for the background merge to report back
    pub async fn settle_merge(&mut self) {
        for _ in 0..200 {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.state.tick();
            if !self.state.is_merging() {
                return;
            }
        }
    }
}
