//! Error types for media operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur fetching or composing media.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("fetch of {url} failed (status {status})")]
    FetchStatus { url: String, status: u16 },

    #[error("fetch of {url} failed: {message}")]
    FetchFailed { url: String, message: String },

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create a fetch failure error.
    pub fn fetch_failed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchFailed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// The external tool's captured diagnostic output, when present.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::FfmpegFailed { stderr, .. } => stderr.as_deref(),
            _ => None,
        }
    }
}
