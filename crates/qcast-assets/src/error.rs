//! Error types for asset store operations.

use thiserror::Error;

/// Result type for asset store operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur talking to the asset store.
///
/// An empty candidate set is not an error; selection models it as `None`.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset store configuration error: {0}")]
    Config(String),

    #[error("asset search failed (status {status}): {body}")]
    SearchFailed { status: u16, body: String },

    #[error("tagging '{public_id}' failed (status {status}): {body}")]
    TagFailed {
        public_id: String,
        status: u16,
        body: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AssetError {
    /// Create a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
