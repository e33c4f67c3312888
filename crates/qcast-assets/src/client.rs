//! Asset store REST client.

use std::time::Duration;

use rand::prelude::IndexedRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qcast_models::Asset;

use crate::error::{AssetError, AssetResult};

/// Maximum candidates requested per search. The candidate set is capped and
/// deterministically ordered; the final pick from it is random.
pub const MAX_SEARCH_RESULTS: u32 = 500;

/// Asset store client configuration.
#[derive(Debug, Clone)]
pub struct AssetStoreConfig {
    /// API base URL (without the cloud name segment)
    pub base_url: String,
    /// Logical cloud/tenant name
    pub cloud_name: String,
    /// API key (basic auth user)
    pub api_key: String,
    /// API secret (basic auth password)
    pub api_secret: String,
    /// Request timeout
    pub timeout: Duration,
}

impl AssetStoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> AssetResult<Self> {
        Ok(Self {
            base_url: std::env::var("QCAST_ASSET_BASE_URL")
                .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string()),
            cloud_name: std::env::var("QCAST_ASSET_CLOUD_NAME")
                .map_err(|_| AssetError::config_error("QCAST_ASSET_CLOUD_NAME not set"))?,
            api_key: std::env::var("QCAST_ASSET_API_KEY")
                .map_err(|_| AssetError::config_error("QCAST_ASSET_API_KEY not set"))?,
            api_secret: std::env::var("QCAST_ASSET_API_SECRET")
                .map_err(|_| AssetError::config_error("QCAST_ASSET_API_SECRET not set"))?,
            timeout: Duration::from_secs(30),
        })
    }
}

/// Search request payload.
#[derive(Debug, Serialize)]
struct SearchRequest {
    expression: String,
    sort_by: Vec<serde_json::Value>,
    max_results: u32,
}

/// Search response payload.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    resources: Vec<Asset>,
}

/// Tag-mutation request payload.
#[derive(Debug, Serialize)]
struct TagRequest {
    tag: String,
    public_ids: Vec<String>,
    command: String,
}

/// REST client for the remote asset store.
#[derive(Clone)]
pub struct AssetStoreClient {
    http: Client,
    config: AssetStoreConfig,
}

impl AssetStoreClient {
    /// Create a new asset store client.
    pub fn new(config: AssetStoreConfig) -> AssetResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("qcast-assets/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AssetResult<Self> {
        Self::new(AssetStoreConfig::from_env()?)
    }

    /// Search for assets under `folder` of `resource_type` that do not
    /// carry `exclude_tag`, ordered by public id ascending, capped at
    /// [`MAX_SEARCH_RESULTS`].
    pub async fn search_unpublished(
        &self,
        folder: &str,
        resource_type: &str,
        exclude_tag: &str,
    ) -> AssetResult<Vec<Asset>> {
        let expression = search_expression(folder, resource_type, exclude_tag);
        debug!(expression = %expression, "Searching asset store");

        let url = format!(
            "{}/{}/resources/search",
            self.config.base_url, self.config.cloud_name
        );
        let request = SearchRequest {
            expression,
            sort_by: vec![serde_json::json!({ "public_id": "asc" })],
            max_results: MAX_SEARCH_RESULTS,
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::SearchFailed {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        debug!("Search returned {} candidates", parsed.resources.len());
        Ok(parsed.resources)
    }

    /// Pick one eligible asset, uniformly at random.
    ///
    /// Randomization spreads which asset gets published run-to-run and is
    /// deliberately unseeded. Returns `None` when nothing is eligible;
    /// callers treat that as "no work to do", not a failure.
    pub async fn select_candidate(
        &self,
        folder: &str,
        resource_type: &str,
        exclude_tag: &str,
    ) -> AssetResult<Option<Asset>> {
        let candidates = self
            .search_unpublished(folder, resource_type, exclude_tag)
            .await?;

        let mut rng = rand::rng();
        let picked = match candidates.choose(&mut rng) {
            Some(asset) => asset.clone(),
            None => {
                info!("No unpublished assets in folder '{}'", folder);
                return Ok(None);
            }
        };
        info!(
            "Selected asset '{}' from {} candidates",
            picked.public_id,
            candidates.len()
        );
        Ok(Some(picked))
    }

    /// Tag the asset as consumed so future selections exclude it.
    ///
    /// Idempotent: the store records tag presence, not tag count, so
    /// re-applying the same tag is a no-op.
    pub async fn mark_consumed(&self, asset: &Asset, tag: &str) -> AssetResult<()> {
        let url = format!(
            "{}/{}/{}/tags",
            self.config.base_url, self.config.cloud_name, asset.resource_type
        );
        let request = TagRequest {
            tag: tag.to_string(),
            public_ids: vec![asset.public_id.clone()],
            command: "add".to_string(),
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetError::TagFailed {
                public_id: asset.public_id.clone(),
                status: status.as_u16(),
                body,
            });
        }

        info!("Tagged asset '{}' with '{}'", asset.public_id, tag);
        Ok(())
    }
}

/// Build the store's search expression for eligible assets.
fn search_expression(folder: &str, resource_type: &str, exclude_tag: &str) -> String {
    format!("resource_type:{resource_type} AND folder:{folder} AND -tags:{exclude_tag}")
}
