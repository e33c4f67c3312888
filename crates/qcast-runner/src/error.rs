//! Pipeline error types.

use thiserror::Error;

use qcast_assets::AssetError;
use qcast_auth::AuthError;
use qcast_media::MediaError;
use qcast_publish::PublishError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Fatal pipeline errors, one variant per failing step so an operator can
/// branch on kind instead of matching message text.
///
/// Tag failures after a successful publish are deliberately absent: they
/// are logged as a recoverable anomaly and never fail the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("asset selection failed: {0}")]
    Selection(AssetError),

    #[error("fetching {what} failed: {source}")]
    Fetch {
        what: &'static str,
        #[source]
        source: MediaError,
    },

    #[error("composition failed: {0}")]
    Compose(MediaError),

    #[error("publishing failed: {0}")]
    Publish(#[from] PublishError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The failing step, for the log trail.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Auth(_) => "authenticate",
            Self::Selection(_) => "select",
            Self::Fetch { .. } => "fetch",
            Self::Compose(_) => "compose",
            Self::Publish(_) => "publish",
            Self::Http(_) => "http-client",
            Self::Io(_) => "io",
        }
    }
}
