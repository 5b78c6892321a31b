// ABOUTME: CLI merge command - mux a trend's video and audio without the TUI

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::info;

use super::MergeArgs;
use crate::catalog;
use crate::config::AppConfig;
use crate::media::{AssetStore, FfmpegTranscoder, Muxer, Transcoder};

/// Where the merged file goes when `--out` is not given
pub fn output_path(args: &MergeArgs, config: &AppConfig, download_name: &str) -> PathBuf {
    args.out
        .clone()
        .unwrap_or_else(|| config.media.export_dir.join(download_name))
}

/// Execute the merge command
pub async fn execute(args: MergeArgs, config: &AppConfig) -> Result<()> {
    let engine = FfmpegTranscoder::new(config.media.ffmpeg_path.clone());
    let path = run(&args, config, Box::new(engine)).await?;
    println!("Merged video written to {}", path.display());
    Ok(())
}

/// Merge with the given engine and write the result
pub async fn run(
    args: &MergeArgs,
    config: &AppConfig,
    engine: Box<dyn Transcoder>,
) -> Result<PathBuf> {
    let trend = catalog::find_trend(&args.trend)
        .ok_or_else(|| anyhow!("Unknown trend '{}'", args.trend))?;
    let media = trend.media();

    let mut muxer = Muxer::new(engine, AssetStore::new(config.media.assets_dir.clone()));
    let bytes = muxer
        .merge(&media)
        .await
        .with_context(|| format!("Failed to merge {}", trend.id))?;

    let path = output_path(args, config, media.merged_download_name);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Merged {} into {}", trend.id, path.display());
    Ok(path)
}
