//! Error types for credential handling.

use thiserror::Error;

/// Result type for credential operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur while obtaining or refreshing a credential.
///
/// All of these are fatal to the current run: without a usable access token
/// nothing downstream can happen.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("bootstrap refresh token is missing or empty")]
    MissingRefreshToken,

    #[error("client config unusable: {0}")]
    ClientConfig(String),

    #[error("token endpoint rejected refresh (status {status}): {body}")]
    RefreshDenied { status: u16, body: String },

    #[error("token endpoint returned no access token")]
    EmptyTokenResponse,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// Create a client-config error.
    pub fn client_config(message: impl Into<String>) -> Self {
        Self::ClientConfig(message.into())
    }
}
