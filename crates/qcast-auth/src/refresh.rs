//! OAuth2 refresh-grant client.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use qcast_models::Credential;

use crate::error::{AuthError, AuthResult};

/// Token endpoint response for a refresh grant.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    /// Some providers rotate the refresh token on use.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Exchange the credential's refresh token for a fresh access token.
///
/// Returns a new credential carrying the refreshed access token and its
/// expiry. The refresh token is kept unless the endpoint rotated it.
pub async fn refresh_credential(http: &Client, credential: &Credential) -> AuthResult<Credential> {
    if !credential.can_refresh() {
        return Err(AuthError::MissingRefreshToken);
    }

    debug!(endpoint = %credential.token_endpoint, "Requesting access token refresh");

    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", credential.refresh_token.as_str()),
        ("client_id", credential.client_id.as_str()),
        ("client_secret", credential.client_secret.as_str()),
    ];

    let response = http
        .post(&credential.token_endpoint)
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::RefreshDenied {
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = response.json().await?;
    if token.access_token.is_empty() {
        return Err(AuthError::EmptyTokenResponse);
    }

    let expiry = token
        .expires_in
        .map(|secs| Utc::now() + Duration::seconds(secs));

    Ok(Credential {
        access_token: Some(token.access_token),
        refresh_token: token
            .refresh_token
            .unwrap_or_else(|| credential.refresh_token.clone()),
        token_endpoint: credential.token_endpoint.clone(),
        client_id: credential.client_id.clone(),
        client_secret: credential.client_secret.clone(),
        scopes: credential.scopes.clone(),
        expiry,
    })
}
