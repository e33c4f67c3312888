//! Error types for publishing.

use thiserror::Error;

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors that can occur uploading a video to the hosting platform.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("credential has no access token")]
    MissingAccessToken,

    #[error("upload rejected (status {status}): {body}")]
    UploadRejected { status: u16, body: String },

    #[error("upload response carried no video id")]
    MissingVideoId,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
