//! Publish pipeline binary.
//!
//! Exit contract for schedulers: 0 after full success (including the
//! no-candidates early exit), non-zero on any unrecovered failure.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qcast_media::FfmpegComposer;
use qcast_runner::{Pipeline, RunnerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("qcast=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting qcast-runner");

    let config = match RunnerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = match Pipeline::new(&config, Arc::new(FfmpegComposer::new())) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build pipeline: {}", e);
            std::process::exit(1);
        }
    };

    if pipeline.execute().await.is_err() {
        // Already logged with step context by the pipeline.
        std::process::exit(1);
    }
}
