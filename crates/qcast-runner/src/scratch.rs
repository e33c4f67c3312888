//! Per-run scratch file lifecycle.
//!
//! Every local artifact of a run lives in one scratch directory and is
//! registered here at creation time. The cleanup phase runs exactly once on
//! every exit path and attempts each deletion independently; individual
//! failures are logged and never change the run outcome. Files left behind
//! by an externally killed process are accepted residue; the next run does
//! not depend on their absence.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

/// Scoped set of scratch files owned by one pipeline run.
#[derive(Debug)]
pub struct ScratchSet {
    dir: PathBuf,
    files: Vec<PathBuf>,
    cleaned: bool,
}

impl ScratchSet {
    /// Create a fresh per-run scratch directory under `work_dir`.
    pub async fn create(work_dir: &Path) -> std::io::Result<Self> {
        let dir = work_dir.join(format!("run-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        debug!("Created scratch directory {}", dir.display());
        Ok(Self {
            dir,
            files: Vec::new(),
            cleaned: false,
        })
    }

    /// Register a scratch file by name and return its full path.
    ///
    /// Registration is independent of whether the file ever gets written;
    /// cleanup tolerates paths that were registered but never created.
    pub fn register(&mut self, name: &str) -> PathBuf {
        let path = self.dir.join(name);
        self.files.push(path.clone());
        path
    }

    /// The scratch directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Registered scratch file paths.
    pub fn registered(&self) -> &[PathBuf] {
        &self.files
    }

    /// Whether cleanup has already run.
    pub fn is_cleaned(&self) -> bool {
        self.cleaned
    }

    /// Delete every registered scratch file, then the directory itself.
    ///
    /// Idempotent: the second and later calls do nothing, so every exit
    /// path may call it safely.
    pub async fn cleanup(&mut self) {
        if self.cleaned {
            return;
        }
        self.cleaned = true;

        for path in &self.files {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Removed scratch file {}", path.display()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!("Cannot remove scratch file {}: {}", path.display(), e),
            }
        }

        if let Err(e) = tokio::fs::remove_dir(&self.dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Cannot remove scratch directory {}: {}",
                    self.dir.display(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_removes_registered_files_and_directory() {
        let work = tempfile::tempdir().unwrap();
        let mut scratch = ScratchSet::create(work.path()).await.unwrap();

        let a = scratch.register("source_video.mp4");
        let b = scratch.register("background_audio.mp3");
        let c = scratch.register("composed_output.mp4");
        for path in [&a, &b, &c] {
            tokio::fs::write(path, b"data").await.unwrap();
        }

        scratch.cleanup().await;

        assert!(!a.exists());
        assert!(!b.exists());
        assert!(!c.exists());
        assert!(!scratch.dir().exists());
        assert!(scratch.is_cleaned());
    }

    #[tokio::test]
    async fn test_cleanup_tolerates_never_created_files() {
        let work = tempfile::tempdir().unwrap();
        let mut scratch = ScratchSet::create(work.path()).await.unwrap();

        let written = scratch.register("written.mp4");
        scratch.register("never_written.mp3");
        tokio::fs::write(&written, b"data").await.unwrap();

        scratch.cleanup().await;
        assert!(!written.exists());
        assert!(!scratch.dir().exists());
    }

    #[tokio::test]
    async fn test_cleanup_runs_once() {
        let work = tempfile::tempdir().unwrap();
        let mut scratch = ScratchSet::create(work.path()).await.unwrap();
        let path = scratch.register("file.mp4");
        tokio::fs::write(&path, b"data").await.unwrap();

        scratch.cleanup().await;
        assert!(scratch.is_cleaned());

        // A second call is a no-op even though the files are gone.
        scratch.cleanup().await;
        assert!(scratch.is_cleaned());
    }

    #[tokio::test]
    async fn test_each_run_gets_its_own_directory() {
        let work = tempfile::tempdir().unwrap();
        let first = ScratchSet::create(work.path()).await.unwrap();
        let second = ScratchSet::create(work.path()).await.unwrap();
        assert_ne!(first.dir(), second.dir());
    }
}
