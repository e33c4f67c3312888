//! Shared data models for the Quotecast publish pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - OAuth2 credentials persisted across runs
//! - Remote assets selected for publishing
//! - The ephemeral per-run publish job
//! - Video metadata attached to published items

pub mod asset;
pub mod credential;
pub mod job;
pub mod metadata;

// Re-export common types
pub use asset::Asset;
pub use credential::{Credential, TOKEN_REFRESH_MARGIN};
pub use job::PublishJob;
pub use metadata::{PrivacyStatus, VideoMetadata};
