//! Synchronization orchestrator

use crate::events::EventReporter;
use crate::queue::TaskQueue;
use crate::walker::TreeWalker;
use crate::worker::WorkerPool;
use mirrorcp_types::{Error, Result, SyncStats, ThreadCount};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tracing::{info, warn};

/// Synchronization request
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Source directory path
    pub source: PathBuf,
    /// Destination directory path
    pub destination: PathBuf,
    /// Sync options
    pub options: SyncOptions,
    /// Request ID for tracking
    pub request_id: uuid::Uuid,
}

impl SyncRequest {
    /// Create a new sync request with default options
    pub fn new<P: AsRef<Path>>(source: P, destination: P) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            options: SyncOptions::default(),
            request_id: uuid::Uuid::new_v4(),
        }
    }

    /// Set sync options
    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }
}

/// Synchronization options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Number of concurrent workers
    pub workers: ThreadCount,
}

impl SyncOptions {
    /// Create options with an explicit worker count
    pub fn with_workers(workers: ThreadCount) -> Self {
        Self { workers }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            workers: ThreadCount::default(),
        }
    }
}

/// Result of a completed synchronization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Request ID
    pub request_id: uuid::Uuid,
    /// Run statistics
    pub stats: SyncStats,
}

impl SyncReport {
    /// Whether the run completed without any failed task
    pub fn is_success(&self) -> bool {
        self.stats.failed_tasks == 0
    }
}

/// Orchestrates one synchronization run
///
/// Owns the task queue and worker pool for the duration of a single
/// [`sync`](SyncEngine::sync) call: it spawns the workers, runs the tree
/// walk, waits for the queue to drain, sends one termination sentinel per
/// worker, and joins them. One engine instance drives one run; create a new
/// engine for a new run.
#[derive(Debug, Default)]
pub struct SyncEngine {
    reporter: EventReporter,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new() -> Self {
        Self {
            reporter: EventReporter::new(),
        }
    }

    /// Take the copy event receiver (can only be called once, before `sync`)
    pub fn take_event_receiver(
        &mut self,
    ) -> Option<tokio::sync::mpsc::UnboundedReceiver<crate::events::CopyEvent>> {
        self.reporter.take_event_receiver()
    }

    /// Perform the synchronization
    pub async fn sync(&mut self, request: SyncRequest) -> Result<SyncReport> {
        let start_time = Instant::now();
        let workers = request.options.workers.get();

        info!(
            "Starting sync: {} -> {} ({} workers)",
            request.source.display(),
            request.destination.display(),
            workers
        );

        self.validate_paths(&request.source, &request.destination)
            .await?;

        let queue = Arc::new(TaskQueue::new());
        let pool = WorkerPool::spawn(Arc::clone(&queue), self.reporter.clone(), workers);

        // The walk runs concurrently with the workers; files may be copied
        // before the walk completes.
        let walk_result = TreeWalker::new(&request.source, &request.destination)
            .run(Arc::clone(&queue))
            .await;

        // The walk has finished (or failed) - nothing enqueues after this
        // point, so the drain condition is final. On walk failure the tasks
        // discovered so far still drain before the error propagates,
        // leaving no worker blocked and no task half-processed.
        queue.wait_drained().await;
        queue.shutdown(workers);
        let mut stats = pool.join().await;

        let summary = match walk_result {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Tree walk failed, aborting after drain: {}", e);
                return Err(e);
            }
        };

        stats.directories_created = summary.directories_created;
        stats.duration = start_time.elapsed();

        info!(
            "Sync completed: {} copied, {} skipped, {} failed in {:?}",
            stats.files_copied, stats.files_skipped, stats.failed_tasks, stats.duration
        );

        Ok(SyncReport {
            request_id: request.request_id,
            stats,
        })
    }

    /// Validate source and destination paths
    async fn validate_paths(&self, source: &Path, destination: &Path) -> Result<()> {
        let metadata = fs::metadata(source).await.map_err(|_| Error::Config {
            message: format!("Source path does not exist: {}", source.display()),
        })?;

        if !metadata.is_dir() {
            return Err(Error::config(format!(
                "Source path is not a directory: {}",
                source.display()
            )));
        }

        fs::create_dir_all(destination).await.map_err(|e| {
            Error::config(format!(
                "Failed to create destination directory '{}': {}",
                destination.display(),
                e
            ))
        })?;

        Ok(())
    }
}
