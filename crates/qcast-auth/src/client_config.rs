//! Bootstrap OAuth2 client configuration.
//!
//! The hosting environment supplies a client-config JSON file (client id,
//! client secret, token endpoint) alongside an out-of-band long-lived
//! refresh token. The file wraps its payload in either a `web` or an
//! `installed` object depending on how the OAuth client was registered;
//! both are accepted.

use std::path::Path;

use serde::Deserialize;

use crate::error::{AuthError, AuthResult};

/// Registered OAuth2 client application.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientApp {
    pub client_id: String,
    pub client_secret: String,
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientConfigFile {
    web: Option<ClientApp>,
    installed: Option<ClientApp>,
}

/// Load the client application config from a JSON file.
pub async fn load_client_app(path: impl AsRef<Path>) -> AuthResult<ClientApp> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AuthError::client_config(format!("cannot read {}: {}", path.display(), e))
    })?;

    let parsed: ClientConfigFile = serde_json::from_str(&raw).map_err(|e| {
        AuthError::client_config(format!("cannot parse {}: {}", path.display(), e))
    })?;

    parsed.web.or(parsed.installed).ok_or_else(|| {
        AuthError::client_config(format!(
            "{} must contain a 'web' or 'installed' client configuration",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_config(content: &str) -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        tokio::fs::write(file.path(), content).await.unwrap();
        file
    }

    #[tokio::test]
    async fn test_loads_web_client() {
        let file = write_config(
            r#"{"web": {"client_id": "id-1", "client_secret": "sec-1", "token_uri": "https://oauth.example.com/token"}}"#,
        )
        .await;

        let app = load_client_app(file.path()).await.unwrap();
        assert_eq!(app.client_id, "id-1");
        assert_eq!(app.token_uri, "https://oauth.example.com/token");
    }

    #[tokio::test]
    async fn test_loads_installed_client() {
        let file = write_config(
            r#"{"installed": {"client_id": "id-2", "client_secret": "sec-2", "token_uri": "https://oauth.example.com/token"}}"#,
        )
        .await;

        let app = load_client_app(file.path()).await.unwrap();
        assert_eq!(app.client_id, "id-2");
    }

    #[tokio::test]
    async fn test_rejects_config_without_client_section() {
        let file = write_config(r#"{"other": {}}"#).await;
        let err = load_client_app(file.path()).await.unwrap_err();
        assert!(matches!(err, AuthError::ClientConfig(_)));
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let file = write_config("not json at all").await;
        let err = load_client_app(file.path()).await.unwrap_err();
        assert!(matches!(err, AuthError::ClientConfig(_)));
    }

    #[tokio::test]
    async fn test_rejects_missing_file() {
        let err = load_client_app("/nonexistent/client_secret.json")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ClientConfig(_)));
    }
}
