//! The publish pipeline state machine.
//!
//! One run walks `Init → Authenticated → Selected → Fetched → Composed →
//! Published → Marked → CleanedUp`. Any component failure short-circuits
//! the forward states, but the cleanup phase runs exactly once regardless
//! of where the run ended.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, error, info, warn};

use qcast_assets::AssetStoreClient;
use qcast_auth::CredentialStore;
use qcast_media::{fetch, Composer};
use qcast_models::PublishJob;
use qcast_publish::PublishClient;

use crate::config::RunnerConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::metadata;
use crate::scratch::ScratchSet;

/// Non-terminal pipeline states, advanced only by a successful step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    Authenticated,
    Selected,
    Fetched,
    Composed,
    Published,
    Marked,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineState::Init => "init",
            PipelineState::Authenticated => "authenticated",
            PipelineState::Selected => "selected",
            PipelineState::Fetched => "fetched",
            PipelineState::Composed => "composed",
            PipelineState::Published => "published",
            PipelineState::Marked => "marked",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Successful run outcomes.
///
/// "Nothing eligible to publish" is an outcome, not an error; schedulers
/// must see exit 0 for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// One asset was published (and, tag state permitting, marked consumed)
    Published {
        /// Source asset public id
        asset_id: String,
        /// Platform-assigned video id
        video_id: String,
    },
    /// The selection query returned zero eligible assets
    NoCandidates,
}

/// Sequences the pipeline components over one run.
pub struct Pipeline<'a> {
    config: &'a RunnerConfig,
    credentials: CredentialStore,
    assets: AssetStoreClient,
    publisher: PublishClient,
    composer: Arc<dyn Composer>,
    http: Client,
}

impl<'a> Pipeline<'a> {
    /// Build a pipeline over the given configuration and composer.
    pub fn new(config: &'a RunnerConfig, composer: Arc<dyn Composer>) -> PipelineResult<Self> {
        let credentials = CredentialStore::new(config.auth.clone())?;
        let assets = AssetStoreClient::new(config.assets.clone())
            .map_err(PipelineError::Selection)?;
        let publisher = PublishClient::new(config.publish.clone())?;
        let http = Client::builder()
            .user_agent(concat!("qcast-runner/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            credentials,
            assets,
            publisher,
            composer,
            http,
        })
    }

    /// Run the pipeline with cleanup on every exit path.
    ///
    /// Scratch files registered before a failure are deleted whether the
    /// run ends in `CleanedUp` or `Failed`; cleanup never masks the run's
    /// own outcome.
    pub async fn execute(&self) -> PipelineResult<RunOutcome> {
        let mut scratch = ScratchSet::create(&self.config.work_dir).await?;
        let result = self.run(&mut scratch).await;
        scratch.cleanup().await;

        match &result {
            Ok(RunOutcome::Published { asset_id, video_id }) => {
                info!(
                    "Run complete: asset '{}' published as video '{}'",
                    asset_id, video_id
                );
            }
            Ok(RunOutcome::NoCandidates) => {
                info!("Run complete: no eligible assets, nothing to do");
            }
            Err(e) => {
                error!(step = e.step(), "Run failed: {}", e);
            }
        }

        result
    }

    /// The forward state machine, without the cleanup phase.
    async fn run(&self, scratch: &mut ScratchSet) -> PipelineResult<RunOutcome> {
        let mut state = PipelineState::Init;
        debug!(state = %state, scratch = %scratch.dir().display(), "Pipeline starting");

        let credential = self.credentials.obtain().await?;
        state = PipelineState::Authenticated;
        debug!(state = %state, "Credential obtained");

        let asset = match self
            .assets
            .select_candidate(
                &self.config.folder,
                &self.config.resource_type,
                &self.config.consumed_tag,
            )
            .await
            .map_err(PipelineError::Selection)?
        {
            Some(asset) => asset,
            None => return Ok(RunOutcome::NoCandidates),
        };
        state = PipelineState::Selected;
        debug!(state = %state, asset = %asset.public_id, "Candidate selected");

        let video_path = scratch.register("source_video.mp4");
        let audio_path = scratch.register("background_audio.mp3");
        let output_path = scratch.register("composed_output.mp4");

        fetch(&self.http, &asset.secure_url, &video_path)
            .await
            .map_err(|e| PipelineError::Fetch {
                what: "source video",
                source: e,
            })?;
        fetch(&self.http, &self.config.audio_url, &audio_path)
            .await
            .map_err(|e| PipelineError::Fetch {
                what: "background audio",
                source: e,
            })?;
        state = PipelineState::Fetched;
        debug!(state = %state, "Inputs downloaded");

        let mut job = PublishJob::new(
            asset,
            video_path,
            audio_path,
            output_path,
            metadata::generate(),
        );

        self.composer
            .compose(&job.video_path, &job.audio_path, &job.output_path)
            .await
            .map_err(|e| {
                if let Some(diagnostics) = e.diagnostics() {
                    error!("Merge tool diagnostics:\n{}", diagnostics);
                }
                PipelineError::Compose(e)
            })?;
        state = PipelineState::Composed;
        debug!(state = %state, "Video and audio merged");

        let video_id = self
            .publisher
            .publish(&credential, &job.output_path, &job.metadata)
            .await?;
        job.published_id = Some(video_id.clone());
        state = PipelineState::Published;
        info!(state = %state, "Published: https://www.youtube.com/watch?v={}", video_id);

        // Tag failure after a successful publish is logged, never fatal:
        // the only risk is the same asset becoming eligible again later.
        match self
            .assets
            .mark_consumed(&job.asset, &self.config.consumed_tag)
            .await
        {
            Ok(()) => {
                state = PipelineState::Marked;
                debug!(state = %state, "Asset marked consumed");
            }
            Err(e) => {
                warn!(
                    "Asset '{}' was published but could not be tagged ({}); \
                     it may be selected again on a future run",
                    job.asset.public_id, e
                );
            }
        }

        Ok(RunOutcome::Published {
            asset_id: job.asset.public_id.clone(),
            video_id,
        })
    }
}
