//! Publish pipeline orchestrator.
//!
//! This crate provides:
//! - The run configuration, built once and passed by reference
//! - The per-run scratch file lifecycle
//! - The pipeline state machine and its failure policy
//! - Generated metadata for published videos

pub mod config;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod scratch;

pub use config::RunnerConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineState, RunOutcome};
pub use scratch::ScratchSet;
