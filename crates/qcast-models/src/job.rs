//! Per-run publish job.

use std::path::PathBuf;

use crate::asset::Asset;
use crate::metadata::VideoMetadata;

/// Ephemeral state for one pipeline run.
///
/// Created after an asset is selected, discarded at run end. Never
/// persisted; idempotency across runs rests on the asset store's tag state,
/// not on this struct.
#[derive(Debug, Clone)]
pub struct PublishJob {
    /// The asset selected for this run
    pub asset: Asset,
    /// Local path of the downloaded video
    pub video_path: PathBuf,
    /// Local path of the downloaded background audio
    pub audio_path: PathBuf,
    /// Local path of the composed output
    pub output_path: PathBuf,
    /// Metadata for the published video
    pub metadata: VideoMetadata,
    /// Platform-assigned id, set once publishing succeeds
    pub published_id: Option<String>,
}

impl PublishJob {
    pub fn new(
        asset: Asset,
        video_path: PathBuf,
        audio_path: PathBuf,
        output_path: PathBuf,
        metadata: VideoMetadata,
    ) -> Self {
        Self {
            asset,
            video_path,
            audio_path,
            output_path,
            metadata,
            published_id: None,
        }
    }
}
