//! OAuth2 credential model.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Margin subtracted from the recorded expiry when deciding whether an
/// access token is still usable. A token this close to expiry could lapse
/// mid-upload, so it is treated as already expired.
pub const TOKEN_REFRESH_MARGIN: Duration = Duration::seconds(60);

/// An OAuth2 token set, persisted between runs so the pipeline can publish
/// unattended.
///
/// A valid credential always carries a non-empty refresh token. The access
/// token may be absent (or expired) and is re-obtained via the refresh grant
/// before use.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Short-lived access token, absent until the first refresh
    pub access_token: Option<String>,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// OAuth2 token endpoint URL
    pub token_endpoint: String,
    /// OAuth2 client ID
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Granted scopes
    pub scopes: Vec<String>,
    /// Access token expiry, when known
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// Whether the access token is present and unexpired at `now`,
    /// with the refresh margin applied.
    ///
    /// A token with no recorded expiry is treated as expired: the cost of a
    /// spurious refresh is lower than an upload failing mid-flight.
    pub fn has_usable_access_token(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_none() {
            return false;
        }
        match self.expiry {
            Some(expiry) => now + TOKEN_REFRESH_MARGIN < expiry,
            None => false,
        }
    }

    /// Whether a refresh grant can be attempted with this credential.
    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

// Manual Debug so token material never reaches the log trail.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &self.access_token.as_deref().map(|_| "<redacted>"))
            .field("refresh_token", &"<redacted>")
            .field("token_endpoint", &self.token_endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("expiry", &self.expiry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential(access_token: Option<&str>, expiry: Option<DateTime<Utc>>) -> Credential {
        Credential {
            access_token: access_token.map(String::from),
            refresh_token: "refresh-xyz".to_string(),
            token_endpoint: "https://oauth.example.com/token".to_string(),
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            scopes: vec!["upload".to_string()],
            expiry,
        }
    }

    #[test]
    fn test_unexpired_token_is_usable() {
        let now = Utc::now();
        let cred = credential(Some("tok"), Some(now + Duration::hours(1)));
        assert!(cred.has_usable_access_token(now));
    }

    #[test]
    fn test_token_inside_refresh_margin_is_not_usable() {
        let now = Utc::now();
        let cred = credential(Some("tok"), Some(now + Duration::seconds(30)));
        assert!(!cred.has_usable_access_token(now));
    }

    #[test]
    fn test_missing_access_token_is_not_usable() {
        let now = Utc::now();
        let cred = credential(None, Some(now + Duration::hours(1)));
        assert!(!cred.has_usable_access_token(now));
    }

    #[test]
    fn test_unknown_expiry_is_not_usable() {
        let cred = credential(Some("tok"), None);
        assert!(!cred.has_usable_access_token(Utc::now()));
    }

    #[test]
    fn test_debug_redacts_secret_material() {
        let cred = credential(Some("super-secret-token"), Some(Utc::now()));
        let rendered = format!("{:?}", cred);
        assert!(!rendered.contains("super-secret-token"));
        assert!(!rendered.contains("refresh-xyz"));
        assert!(!rendered.contains("client-secret"));
        assert!(rendered.contains("client-id"));
    }

    #[test]
    fn test_round_trips_through_json() {
        let cred = credential(Some("tok"), Some(Utc::now()));
        let json = serde_json::to_string(&cred).unwrap();
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back.access_token.as_deref(), Some("tok"));
        assert_eq!(back.refresh_token, "refresh-xyz");
    }
}
