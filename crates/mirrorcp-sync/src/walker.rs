//! Source tree traversal and task discovery

use crate::queue::{SyncTask, TaskQueue};
use mirrorcp_types::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Summary of a completed tree walk
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSummary {
    /// Destination directories created (or confirmed to exist)
    pub directories_created: u64,
    /// Regular files discovered and enqueued
    pub files_discovered: u64,
}

/// Walks the source tree, mirroring its directory structure and enqueuing
/// one task per regular file
///
/// Each directory's mirror is created before any task for a file inside it
/// is enqueued, so a worker never observes a missing destination parent.
/// Symbolic links are not followed; symlinks and special files are skipped
/// with a warning. An unreadable directory fails the whole walk - a silent
/// skip would present an incomplete mirror as complete.
#[derive(Debug)]
pub struct TreeWalker {
    source_root: PathBuf,
    destination_root: PathBuf,
}

impl TreeWalker {
    /// Create a new tree walker
    pub fn new<P1: Into<PathBuf>, P2: Into<PathBuf>>(
        source_root: P1,
        destination_root: P2,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
        }
    }

    /// Run the walk on a blocking task, enqueuing discovered files
    ///
    /// Enqueued tasks remain valid even if the walk fails partway; the
    /// caller decides whether to drain them before propagating the error.
    pub async fn run(self, queue: Arc<TaskQueue>) -> Result<WalkSummary> {
        tokio::task::spawn_blocking(move || self.walk(&queue))
            .await
            .map_err(|e| Error::walk(format!("tree walker task failed: {}", e)))?
    }

    fn walk(&self, queue: &TaskQueue) -> Result<WalkSummary> {
        let mut summary = WalkSummary::default();

        for entry in WalkDir::new(&self.source_root).follow_links(false) {
            let entry = entry.map_err(|e| Error::walk(e.to_string()))?;

            let relative = entry
                .path()
                .strip_prefix(&self.source_root)
                .map_err(|e| Error::walk(format!("{}: {}", entry.path().display(), e)))?;
            let destination = self.destination_root.join(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                // Created before any file task inside it can be enqueued.
                std::fs::create_dir_all(&destination).map_err(|e| {
                    Error::walk(format!(
                        "failed to create directory '{}': {}",
                        destination.display(),
                        e
                    ))
                })?;
                summary.directories_created += 1;
            } else if file_type.is_file() {
                queue.enqueue(SyncTask::new(entry.path(), destination));
                summary.files_discovered += 1;
            } else {
                warn!("Skipping non-regular file: {}", entry.path().display());
            }
        }

        debug!(
            "Walk complete: {} directories, {} files",
            summary.directories_created, summary.files_discovered
        );
        Ok(summary)
    }
}
