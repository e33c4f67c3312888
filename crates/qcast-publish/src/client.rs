//! Hosting platform upload client.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use qcast_models::{Credential, VideoMetadata};

use crate::error::{PublishError, PublishResult};

/// Default video insert endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "https://www.googleapis.com/upload/youtube/v3/videos";

/// Publish client configuration.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Video insert endpoint URL
    pub upload_url: String,
    /// Request timeout (uploads can be slow)
    pub timeout: Duration,
}

impl PublishConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            upload_url: std::env::var("QCAST_UPLOAD_URL")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_URL.to_string()),
            timeout: Duration::from_secs(600),
        }
    }
}

/// Insert request metadata body.
#[derive(Debug, Serialize)]
struct InsertBody {
    snippet: serde_json::Value,
    status: serde_json::Value,
}

/// Insert response payload.
#[derive(Debug, Deserialize)]
struct InsertResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Uploads composed videos to the hosting platform.
#[derive(Clone)]
pub struct PublishClient {
    http: Client,
    config: PublishConfig,
}

impl PublishClient {
    /// Create a new publish client.
    pub fn new(config: PublishConfig) -> PublishResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("qcast-publish/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> PublishResult<Self> {
        Self::new(PublishConfig::from_env())
    }

    /// Upload `file_path` as a new video with the given metadata.
    ///
    /// Returns the platform-assigned video id. The platform's insert call
    /// is atomic from our perspective: either an id comes back or the whole
    /// call fails.
    pub async fn publish(
        &self,
        credential: &Credential,
        file_path: impl AsRef<Path>,
        metadata: &VideoMetadata,
    ) -> PublishResult<String> {
        let file_path = file_path.as_ref();
        let access_token = credential
            .access_token
            .as_deref()
            .ok_or(PublishError::MissingAccessToken)?;

        let body = InsertBody {
            snippet: json!({
                "title": metadata.title,
                "description": metadata.description,
                "tags": metadata.tags,
                "categoryId": metadata.category_id,
            }),
            status: json!({
                "privacyStatus": metadata.privacy.as_str(),
            }),
        };

        info!(
            "Uploading '{}' ({}) to the hosting platform",
            metadata.title,
            file_path.display()
        );

        let media = tokio::fs::read(file_path).await?;
        debug!("Read {} bytes of composed media", media.len());

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video.mp4".to_string());

        let form = Form::new()
            .part(
                "metadata",
                Part::text(serde_json::to_string(&body)?).mime_str("application/json")?,
            )
            .part(
                "media",
                Part::bytes(media)
                    .file_name(file_name)
                    .mime_str("video/mp4")?,
            );

        let response = self
            .http
            .post(&self.config.upload_url)
            .query(&[("uploadType", "multipart"), ("part", "snippet,status")])
            .bearer_auth(access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: InsertResponse = response.json().await?;
        let id = parsed.id.ok_or(PublishError::MissingVideoId)?;
        info!("Video published with id '{}'", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use qcast_models::PrivacyStatus;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential(token: Option<&str>) -> Credential {
        Credential {
            access_token: token.map(String::from),
            refresh_token: "refresh".to_string(),
            token_endpoint: "https://oauth.example.com/token".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            scopes: vec![],
            expiry: Some(Utc::now() + ChronoDuration::hours(1)),
        }
    }

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Daily Dose of Motivation".to_string(),
            description: "Fuel your dreams.".to_string(),
            tags: vec!["motivation".to_string()],
            category_id: "22".to_string(),
            privacy: PrivacyStatus::Public,
        }
    }

    async fn write_media(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("composed_output.mp4");
        tokio::fs::write(&path, b"composed bytes").await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_publish_returns_platform_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/videos"))
            .and(query_param("uploadType", "multipart"))
            .and(query_param("part", "snippet,status"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "abc123" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let media_path = write_media(&dir).await;
        let client = PublishClient::new(PublishConfig {
            upload_url: format!("{}/upload/videos", server.uri()),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let id = client
            .publish(&credential(Some("tok-123")), &media_path, &metadata())
            .await
            .unwrap();
        assert_eq!(id, "abc123");
    }

    #[tokio::test]
    async fn test_publish_fails_on_rejected_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/videos"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let media_path = write_media(&dir).await;
        let client = PublishClient::new(PublishConfig {
            upload_url: format!("{}/upload/videos", server.uri()),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = client
            .publish(&credential(Some("tok-123")), &media_path, &metadata())
            .await
            .unwrap_err();
        match err {
            PublishError::UploadRejected { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("quota"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_publish_without_access_token_fails_before_any_io() {
        let client = PublishClient::new(PublishConfig {
            upload_url: "http://127.0.0.1:1/upload".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let err = client
            .publish(&credential(None), "/nonexistent.mp4", &metadata())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingAccessToken));
    }

    #[tokio::test]
    async fn test_publish_without_id_in_response_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let media_path = write_media(&dir).await;
        let client = PublishClient::new(PublishConfig {
            upload_url: format!("{}/upload/videos", server.uri()),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let err = client
            .publish(&credential(Some("tok-123")), &media_path, &metadata())
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::MissingVideoId));
    }
}
