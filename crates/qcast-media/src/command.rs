//! FFmpeg command builder and runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};

/// Builder for FFmpeg commands over one or more inputs.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file paths, in order
    inputs: Vec<PathBuf>,
    /// Output file path
    output: PathBuf,
    /// Output arguments (after the inputs)
    output_args: Vec<String>,
    /// Whether to overwrite the output
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command for the given output.
    pub fn new(output: impl AsRef<Path>) -> Self {
        Self {
            inputs: Vec::new(),
            output: output.as_ref().to_path_buf(),
            output_args: Vec::new(),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Add an input file.
    pub fn input(mut self, path: impl AsRef<Path>) -> Self {
        self.inputs.push(path.as_ref().to_path_buf());
        self
    }

    /// Add an output argument.
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Map a stream from an input into the output (e.g. "0:v").
    pub fn map(self, stream: impl Into<String>) -> Self {
        self.output_arg("-map").output_arg(stream)
    }

    /// Set the video codec.
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    /// Truncate the output to the shortest input stream.
    pub fn shortest(self) -> Self {
        self.output_arg("-shortest")
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        if self.overwrite {
            args.push("-y".to_string());
        }

        args.push("-v".to_string());
        args.push(self.log_level.clone());

        for input in &self.inputs {
            args.push("-i".to_string());
            args.push(input.to_string_lossy().to_string());
        }

        args.extend(self.output_args.clone());
        args.push(self.output.to_string_lossy().to_string());

        args
    }

    /// Run the command, capturing diagnostics.
    ///
    /// A non-zero exit becomes [`MediaError::FfmpegFailed`] with the
    /// captured stderr text, so an operator can triage without re-running.
    pub async fn run(&self) -> MediaResult<()> {
        check_ffmpeg()?;

        let args = self.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            Err(MediaError::ffmpeg_failed(
                "FFmpeg exited with non-zero status",
                Some(stderr),
                output.status.code(),
            ))
        }
    }
}

/// Check that FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_appear_in_order() {
        let cmd = FfmpegCommand::new("out.mp4")
            .input("video.mp4")
            .input("audio.mp3");

        let args = cmd.build_args();
        let first_i = args.iter().position(|a| a == "-i").unwrap();
        assert_eq!(args[first_i + 1], "video.mp4");
        assert_eq!(args[first_i + 2], "-i");
        assert_eq!(args[first_i + 3], "audio.mp3");
    }

    #[test]
    fn test_overwrite_flag_present() {
        let args = FfmpegCommand::new("out.mp4").input("in.mp4").build_args();
        assert_eq!(args[0], "-y");
        assert_eq!(args.last().unwrap(), "out.mp4");
    }

    #[test]
    fn test_stream_mapping_and_copy_args() {
        let args = FfmpegCommand::new("out.mp4")
            .input("video.mp4")
            .input("audio.mp3")
            .map("0:v")
            .map("1:a")
            .video_codec("copy")
            .shortest()
            .build_args();

        let joined = args.join(" ");
        assert!(joined.contains("-map 0:v"));
        assert!(joined.contains("-map 1:a"));
        assert!(joined.contains("-c:v copy"));
        assert!(joined.contains("-shortest"));
    }
}
