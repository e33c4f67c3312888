//! Video upload against the hosting platform's insert API.
//!
//! This crate provides:
//! - A multipart insert client (metadata part + media payload)
//! - Bearer authorization from the pipeline's credential
//! - Fixed public visibility and content classification

pub mod client;
pub mod error;

pub use client::{PublishClient, PublishConfig, DEFAULT_UPLOAD_URL};
pub use error::{PublishError, PublishResult};
