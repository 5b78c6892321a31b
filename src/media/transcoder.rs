// ABOUTME: Transcoding engine capability and its ffmpeg-process implementation
//
// The engine is used as a black box with a tiny virtual filesystem:
// - load: locate and verify the engine
// - write_file / read_file: move bytes in and out of its working directory
// - exec: run one command line against those files

use super::MediaError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

/// Longest stderr excerpt carried in an exec error
const STDERR_TAIL_CHARS: usize = 400;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcoder: Send {
    async fn load(&mut self) -> Result<(), MediaError>;
    async fn write_file(&mut self, name: &str, data: Vec<u8>) -> Result<(), MediaError>;
    async fn exec(&mut self, args: Vec<String>) -> Result<(), MediaError>;
    async fn read_file(&mut self, name: &str) -> Result<Vec<u8>, MediaError>;
}

/// Runs the `ffmpeg` binary inside a private scratch directory
#[derive(Debug)]
pub struct FfmpegTranscoder {
    configured: Option<PathBuf>,
    binary: Option<PathBuf>,
    workdir: Option<TempDir>,
}

impl FfmpegTranscoder {
    /// `binary` overrides the `PATH` lookup
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self {
            configured: binary,
            binary: None,
            workdir: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.binary.is_some() && self.workdir.is_some()
    }

    fn locate(&self) -> Result<PathBuf, MediaError> {
        match &self.configured {
            Some(path) if path.is_file() => Ok(path.clone()),
            Some(path) => which::which(path).map_err(|_| MediaError::EngineUnavailable),
            None => which::which("ffmpeg").map_err(|_| MediaError::EngineUnavailable),
        }
    }

    fn loaded(&self) -> Result<(&Path, &Path), MediaError> {
        match (&self.binary, &self.workdir) {
            (Some(binary), Some(workdir)) => Ok((binary.as_path(), workdir.path())),
            _ => Err(MediaError::EngineUnavailable),
        }
    }

    /// Engine file names must stay inside the scratch directory
    fn file_path(&self, name: &str) -> Result<PathBuf, MediaError> {
        let (_, workdir) = self.loaded()?;
        let file_name = Path::new(name)
            .file_name()
            .ok_or_else(|| MediaError::EngineLoad(format!("invalid file name '{name}'")))?;
        Ok(workdir.join(file_name))
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new(None)
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= STDERR_TAIL_CHARS {
        return trimmed.to_string();
    }
    trimmed.chars().skip(count - STDERR_TAIL_CHARS).collect()
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn load(&mut self) -> Result<(), MediaError> {
        if self.is_loaded() {
            return Ok(());
        }

        let binary = self.locate()?;
        let output = Command::new(&binary)
            .arg("-version")
            .output()
            .await
            .map_err(|e| MediaError::EngineLoad(e.to_string()))?;
        if !output.status.success() {
            return Err(MediaError::EngineLoad(stderr_tail(&output.stderr)));
        }

        let workdir = TempDir::new()?;
        info!(
            "Transcoder ready: {} (scratch {})",
            binary.display(),
            workdir.path().display()
        );
        self.binary = Some(binary);
        self.workdir = Some(workdir);
        Ok(())
    }

    async fn write_file(&mut self, name: &str, data: Vec<u8>) -> Result<(), MediaError> {
        let path = self.file_path(name)?;
        debug!("Writing {} bytes to {}", data.len(), path.display());
        tokio::fs::write(path, data).await?;
        Ok(())
    }

    async fn exec(&mut self, args: Vec<String>) -> Result<(), MediaError> {
        let (binary, workdir) = self.loaded()?;
        debug!("ffmpeg {}", args.join(" "));
        let output = Command::new(binary)
            .args(["-hide_banner", "-nostdin", "-y"])
            .args(&args)
            .current_dir(workdir)
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(MediaError::Exec {
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            })
        }
    }

    async fn read_file(&mut self, name: &str) -> Result<Vec<u8>, MediaError> {
        let path = self.file_path(name)?;
        Ok(tokio::fs::read(path).await?)
    }
}
