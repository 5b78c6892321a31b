// ABOUTME: Combines a trend's fixed video clip with its audio track through the transcoder
// Video stream is copied, audio is re-encoded to AAC, output stops at the shorter input

use super::{AssetStore, MediaError, Transcoder};
use crate::catalog::TrendMedia;
use tracing::{info, warn};

const VIDEO_INPUT: &str = "input.mp4";
const AUDIO_INPUT: &str = "input.mp3";
const OUTPUT: &str = "output.mp4";

/// Command line handed to the engine for the mux
pub fn mux_args() -> Vec<String> {
    [
        "-i", VIDEO_INPUT, "-i", AUDIO_INPUT, "-c:v", "copy", "-c:a", "aac", "-shortest", OUTPUT,
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

/// Owns the transcoding engine for the life of the process.
///
/// The engine is loaded on first use only; a failed load leaves it unloaded
/// so the next merge retries.
pub struct Muxer {
    engine: Box<dyn Transcoder>,
    assets: AssetStore,
    loaded: bool,
}

impl std::fmt::Debug for Muxer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Muxer")
            .field("assets", &self.assets)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl Muxer {
    pub fn new(engine: Box<dyn Transcoder>, assets: AssetStore) -> Self {
        Self {
            engine,
            assets,
            loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    async fn ensure_loaded(&mut self) -> Result<(), MediaError> {
        if !self.loaded {
            info!("Loading transcoder");
            self.engine.load().await?;
            self.loaded = true;
        }
        Ok(())
    }

    /// Produce the merged MP4 bytes for `media`
    pub async fn merge(&mut self, media: &TrendMedia) -> Result<Vec<u8>, MediaError> {
        let audio_src = media.audio_src.ok_or(MediaError::NoAudioTrack)?;

        let result = self.run(media.video_src, audio_src).await;
        match &result {
            Ok(bytes) => info!(
                "Merged {} + {} into {} bytes",
                media.video_src,
                audio_src,
                bytes.len()
            ),
            Err(e) => warn!("Merge of {} failed: {}", media.video_src, e),
        }
        result
    }

    async fn run(&mut self, video_src: &str, audio_src: &str) -> Result<Vec<u8>, MediaError> {
        self.ensure_loaded().await?;

        let video = self.assets.fetch(video_src).await?;
        let audio = self.assets.fetch(audio_src).await?;

        self.engine.write_file(VIDEO_INPUT, video).await?;
        self.engine.write_file(AUDIO_INPUT, audio).await?;
        self.engine.exec(mux_args()).await?;
        self.engine.read_file(OUTPUT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_trend;
    use crate::media::transcoder::MockTranscoder;
    use mockall::Sequence;
    use tempfile::TempDir;

    fn assets_with(files: &[(&str, &str)]) -> (TempDir, AssetStore) {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents.as_bytes()).unwrap();
        }
        let store = AssetStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_mux_args_copy_video_aac_shortest() {
        assert_eq!(
            mux_args(),
            vec![
                "-i", "input.mp4", "-i", "input.mp3", "-c:v", "copy", "-c:a", "aac",
                "-shortest", "output.mp4"
            ]
        );
    }

    #[tokio::test]
    async fn test_merge_drives_engine_in_order() {
        let (_dir, assets) =
            assets_with(&[("ibiza_boss.mp4", "video"), ("ibiza_boss.mp3", "audio")]);
        let mut engine = MockTranscoder::new();
        let mut seq = Sequence::new();

        engine.expect_load().times(1).in_sequence(&mut seq).returning(|| Ok(()));
        engine
            .expect_write_file()
            .withf(|name, data| name.to_string() == "input.mp4" && data.as_slice() == b"video")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        engine
            .expect_write_file()
            .withf(|name, data| name.to_string() == "input.mp3" && data.as_slice() == b"audio")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        engine
            .expect_exec()
            .withf(|args| *args == mux_args())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        engine
            .expect_read_file()
            .withf(|name| name.to_string() == "output.mp4")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(b"merged".to_vec()));

        let mut muxer = Muxer::new(Box::new(engine), assets);
        let media = find_trend("ibiza-final-boss").unwrap().media();
        let bytes = muxer.merge(&media).await.unwrap();

        assert_eq!(bytes, b"merged");
        assert!(muxer.is_loaded());
    }

    #[tokio::test]
    async fn test_engine_loaded_once() {
        let (_dir, assets) = assets_with(&[
            ("apple_tungtung.mp4", "video"),
            ("apple_tungtung.mp3", "audio"),
        ]);
        let mut engine = MockTranscoder::new();
        engine.expect_load().times(1).returning(|| Ok(()));
        engine.expect_write_file().times(4).returning(|_, _| Ok(()));
        engine.expect_exec().times(2).returning(|_| Ok(()));
        engine.expect_read_file().times(2).returning(|_| Ok(vec![1]));

        let mut muxer = Muxer::new(Box::new(engine), assets);
        let media = find_trend("italian-brainrot").unwrap().media();
        muxer.merge(&media).await.unwrap();
        muxer.merge(&media).await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_load_is_retried() {
        let (_dir, assets) = assets_with(&[]);
        let mut engine = MockTranscoder::new();
        engine
            .expect_load()
            .times(2)
            .returning(|| Err(MediaError::EngineUnavailable));

        let mut muxer = Muxer::new(Box::new(engine), assets);
        let media = find_trend("ok-garmin").unwrap().media();
        assert!(matches!(muxer.merge(&media).await, Err(MediaError::EngineUnavailable)));
        assert!(!muxer.is_loaded());
        assert!(matches!(muxer.merge(&media).await, Err(MediaError::EngineUnavailable)));
    }

    #[tokio::test]
    async fn test_missing_asset_surfaces_path() {
        let (_dir, assets) = assets_with(&[("tesla_okgarmin.mp4", "video")]);
        let mut engine = MockTranscoder::new();
        engine.expect_load().returning(|| Ok(()));
        engine.expect_write_file().never();

        let mut muxer = Muxer::new(Box::new(engine), assets);
        let media = find_trend("ok-garmin").unwrap().media();
        match muxer.merge(&media).await {
            Err(MediaError::AssetFetch { path, .. }) => assert_eq!(path, "/tesla_okgarmin.mp3"),
            other => panic!("expected AssetFetch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trend_without_audio() {
        let (_dir, assets) = assets_with(&[]);
        let mut engine = MockTranscoder::new();
        engine.expect_load().never();

        let mut muxer = Muxer::new(Box::new(engine), assets);
        let media = find_trend("labubu").unwrap().media();
        assert!(matches!(muxer.merge(&media).await, Err(MediaError::NoAudioTrack)));
    }
}
