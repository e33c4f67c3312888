//! Asset store client.
//!
//! This crate provides:
//! - Search for unpublished assets (folder + resource type, consumed tag
//!   excluded, stable sort, bounded page)
//! - Uniform-random candidate selection
//! - Consumed-tagging so an asset is published at most once

pub mod client;
pub mod error;

pub use client::{AssetStoreClient, AssetStoreConfig, MAX_SEARCH_RESULTS};
pub use error::{AssetError, AssetResult};
