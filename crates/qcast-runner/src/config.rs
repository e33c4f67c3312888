//! Runner configuration.
//!
//! One `RunnerConfig` is built in `main` and passed by reference to every
//! component that needs it. No component reads the environment on its own.

use std::path::PathBuf;

use qcast_assets::AssetStoreConfig;
use qcast_auth::AuthConfig;
use qcast_publish::PublishConfig;

use crate::error::{PipelineError, PipelineResult};

/// Configuration for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Credential store configuration
    pub auth: AuthConfig,
    /// Asset store configuration
    pub assets: AssetStoreConfig,
    /// Publish client configuration
    pub publish: PublishConfig,
    /// Asset store folder to select from
    pub folder: String,
    /// Asset store resource type to select
    pub resource_type: String,
    /// Tag marking an asset as already published
    pub consumed_tag: String,
    /// URL of the fixed background audio track
    pub audio_url: String,
    /// Directory for per-run scratch files
    pub work_dir: PathBuf,
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> PipelineResult<Self> {
        let assets = AssetStoreConfig::from_env()
            .map_err(|e| PipelineError::config_error(e.to_string()))?;

        let audio_url = std::env::var("QCAST_AUDIO_URL")
            .map_err(|_| PipelineError::config_error("QCAST_AUDIO_URL not set"))?;

        Ok(Self {
            auth: AuthConfig::from_env(),
            assets,
            publish: PublishConfig::from_env(),
            folder: std::env::var("QCAST_ASSET_FOLDER")
                .unwrap_or_else(|_| "Quotes_Videos".to_string()),
            resource_type: std::env::var("QCAST_ASSET_RESOURCE_TYPE")
                .unwrap_or_else(|_| "video".to_string()),
            consumed_tag: std::env::var("QCAST_CONSUMED_TAG")
                .unwrap_or_else(|_| "uploaded_to_youtube".to_string()),
            audio_url,
            work_dir: std::env::var("QCAST_WORK_DIR")
                .unwrap_or_else(|_| "/tmp/qcast".to_string())
                .into(),
        })
    }
}
