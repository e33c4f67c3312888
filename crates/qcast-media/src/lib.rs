//! Streaming downloads and FFmpeg composition.
//!
//! This crate provides:
//! - Chunked HTTP download to local scratch storage
//! - An FFmpeg command builder with captured diagnostics
//! - The video+audio merge used by the publish pipeline

pub mod command;
pub mod compose;
pub mod error;
pub mod fetch;

pub use command::{check_ffmpeg, FfmpegCommand};
pub use compose::{Composer, FfmpegComposer};
pub use error::{MediaError, MediaResult};
pub use fetch::fetch;
