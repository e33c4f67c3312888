//! Persisted credential store.
//!
//! Keeps one OAuth2 credential alive across unattended runs:
//! - a previously persisted credential is reused while its access token
//!   is unexpired,
//! - an expired access token is refreshed with the stored refresh token,
//! - with no usable stored state, a fresh credential is bootstrapped from
//!   the client-config file plus the environment-supplied refresh token.
//!
//! Every successful refresh is re-persisted so the next run starts warm.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info, warn};

use qcast_models::Credential;

use crate::client_config::load_client_app;
use crate::error::{AuthError, AuthResult};
use crate::refresh::refresh_credential;

/// Default scope requested for bootstrapped credentials.
pub const UPLOAD_SCOPE: &str = "https://www.googleapis.com/auth/youtube.upload";

/// Credential store configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Where the credential blob is persisted between runs
    pub token_path: PathBuf,
    /// Path to the OAuth client-config JSON file
    pub client_config_path: PathBuf,
    /// Out-of-band long-lived refresh token for bootstrapping
    pub bootstrap_refresh_token: Option<String>,
    /// Scopes requested for bootstrapped credentials
    pub scopes: Vec<String>,
    /// HTTP timeout for token endpoint calls
    pub timeout: Duration,
}

impl AuthConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            token_path: std::env::var("QCAST_TOKEN_FILE")
                .unwrap_or_else(|_| "token.json".to_string())
                .into(),
            client_config_path: std::env::var("QCAST_CLIENT_CONFIG_FILE")
                .unwrap_or_else(|_| "client_secret.json".to_string())
                .into(),
            bootstrap_refresh_token: std::env::var("QCAST_REFRESH_TOKEN")
                .ok()
                .filter(|s| !s.is_empty()),
            scopes: vec![UPLOAD_SCOPE.to_string()],
            timeout: Duration::from_secs(30),
        }
    }
}

/// Loads, refreshes and persists the pipeline's OAuth2 credential.
pub struct CredentialStore {
    http: Client,
    config: AuthConfig,
}

impl CredentialStore {
    /// Create a new credential store.
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("qcast-auth/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Obtain a credential with a usable access token.
    ///
    /// Tries, in order: the persisted credential as-is, a refresh of the
    /// persisted credential, and a bootstrap from client config plus the
    /// environment refresh token. The winning credential is persisted
    /// (overwriting any prior blob) before being returned.
    pub async fn obtain(&self) -> AuthResult<Credential> {
        if let Some(stored) = self.load_persisted().await {
            if stored.has_usable_access_token(Utc::now()) {
                debug!("Persisted access token still valid, reusing");
                self.persist(&stored).await?;
                return Ok(stored);
            }

            if stored.can_refresh() {
                info!("Persisted access token expired, refreshing");
                match refresh_credential(&self.http, &stored).await {
                    Ok(refreshed) => {
                        self.persist(&refreshed).await?;
                        return Ok(refreshed);
                    }
                    Err(e) => {
                        warn!("Refresh of persisted credential failed: {}", e);
                    }
                }
            }
        }

        info!("No usable persisted credential, bootstrapping from client config");
        let bootstrapped = self.bootstrap().await?;
        self.persist(&bootstrapped).await?;
        Ok(bootstrapped)
    }

    /// Load the persisted credential, discarding unreadable or corrupt blobs.
    ///
    /// A corrupt blob is deleted so the next run starts from a clean slate;
    /// load failure alone never fails the run.
    async fn load_persisted(&self) -> Option<Credential> {
        let path = &self.config.token_path;
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read persisted credential {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<Credential>(&raw) {
            Ok(cred) if cred.can_refresh() => {
                debug!("Loaded persisted credential from {}", path.display());
                Some(cred)
            }
            Ok(_) => {
                warn!("Persisted credential has no refresh token, discarding");
                self.discard_persisted(path).await;
                None
            }
            Err(e) => {
                warn!(
                    "Persisted credential {} is corrupt ({}), discarding",
                    path.display(),
                    e
                );
                self.discard_persisted(path).await;
                None
            }
        }
    }

    async fn discard_persisted(&self, path: &Path) {
        if let Err(e) = tokio::fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Cannot remove corrupt credential {}: {}", path.display(), e);
            }
        }
    }

    /// Build a fresh credential from the client config and the bootstrap
    /// refresh token, and refresh it immediately to obtain an access token.
    async fn bootstrap(&self) -> AuthResult<Credential> {
        let refresh_token = self
            .config
            .bootstrap_refresh_token
            .clone()
            .ok_or(AuthError::MissingRefreshToken)?;

        let app = load_client_app(&self.config.client_config_path).await?;

        let seed = Credential {
            access_token: None,
            refresh_token,
            token_endpoint: app.token_uri,
            client_id: app.client_id,
            client_secret: app.client_secret,
            scopes: self.config.scopes.clone(),
            expiry: None,
        };

        refresh_credential(&self.http, &seed).await
    }

    /// Persist the credential, overwriting any prior blob.
    async fn persist(&self, credential: &Credential) -> AuthResult<()> {
        let path = &self.config.token_path;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let blob = serde_json::to_string_pretty(credential)?;
        tokio::fs::write(path, blob).await?;
        debug!("Persisted credential to {}", path.display());
        Ok(())
    }
}
