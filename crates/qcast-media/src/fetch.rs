//! Streaming HTTP download to local scratch storage.

use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::{MediaError, MediaResult};

/// Download `url` to `dest`, streaming response chunks to disk.
///
/// Memory stays bounded regardless of file size. Any non-success status or
/// transport fault is an error; no retry happens here (that policy belongs
/// to the caller).
pub async fn fetch(client: &Client, url: &str, dest: impl AsRef<Path>) -> MediaResult<()> {
    let dest = dest.as_ref();
    debug!("Downloading {} to {}", url, dest.display());

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| MediaError::fetch_failed(url, e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MediaError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = File::create(dest).await?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| MediaError::fetch_failed(url, e.to_string()))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    info!("Downloaded {} bytes to {}", written, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_body_to_destination() {
        let server = MockServer::start().await;
        let body: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
        Mock::given(method("GET"))
            .and(path("/clip.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("clip.mp4");
        fetch(&Client::new(), &format!("{}/clip.mp4", server.uri()), &dest)
            .await
            .unwrap();

        let on_disk = tokio::fs::read(&dest).await.unwrap();
        assert_eq!(on_disk, body);
    }

    #[tokio::test]
    async fn test_fetch_fails_on_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.mp4"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("gone.mp4");
        let err = fetch(&Client::new(), &format!("{}/gone.mp4", server.uri()), &dest)
            .await
            .unwrap_err();
        match err {
            MediaError::FetchStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_fails_on_unreachable_host() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("never.mp4");
        let err = fetch(
            &Client::new(),
            "http://127.0.0.1:1/never.mp4",
            &dest,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MediaError::FetchFailed { .. }));
    }
}
