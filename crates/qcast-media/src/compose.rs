//! Video/audio composition.
//!
//! Combines a video input with a separate audio input into one output:
//! the visual stream comes exclusively from the video (its own audio track
//! is discarded), the audio stream exclusively from the audio input, the
//! video stream is copied without re-encoding, and the result is truncated
//! to the shorter input.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::info;

use crate::command::FfmpegCommand;
use crate::error::{MediaError, MediaResult};

/// Seam for the external merge tool, so callers can test pipeline flow
/// without an ffmpeg binary on PATH.
#[async_trait]
pub trait Composer: Send + Sync {
    /// Merge `video_path` and `audio_path` into `output_path`, overwriting
    /// any pre-existing file there. Returns the output path.
    async fn compose(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> MediaResult<PathBuf>;
}

/// Production composer backed by the ffmpeg subprocess.
#[derive(Debug, Default, Clone)]
pub struct FfmpegComposer;

impl FfmpegComposer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Composer for FfmpegComposer {
    async fn compose(
        &self,
        video_path: &Path,
        audio_path: &Path,
        output_path: &Path,
    ) -> MediaResult<PathBuf> {
        if !video_path.exists() {
            return Err(MediaError::FileNotFound(video_path.to_path_buf()));
        }
        if !audio_path.exists() {
            return Err(MediaError::FileNotFound(audio_path.to_path_buf()));
        }

        info!(
            "Merging {} + {} -> {}",
            video_path.display(),
            audio_path.display(),
            output_path.display()
        );

        FfmpegCommand::new(output_path)
            .input(video_path)
            .input(audio_path)
            .map("0:v")
            .map("1:a")
            .video_codec("copy")
            .shortest()
            .run()
            .await?;

        info!("Composed output written to {}", output_path.display());
        Ok(output_path.to_path_buf())
    }
}
