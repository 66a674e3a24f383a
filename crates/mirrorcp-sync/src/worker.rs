//! Worker pool draining the task queue

use crate::copier::FileCopier;
use crate::detector::{ChangeDetector, CopyDecision};
use crate::events::EventReporter;
use crate::queue::{QueueItem, SyncTask, TaskQueue};
use mirrorcp_types::{Result, SyncStats};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A fixed-size pool of worker tasks
///
/// Workers pull tasks from the shared queue, run change detection and
/// conditionally copy, and mark each task done whether it succeeded or
/// failed. A per-task error never crashes a worker; skipping `mark_done`
/// would leave the orchestrator waiting on the drain forever. Each worker
/// exits after consuming exactly one termination sentinel and returns its
/// local statistics.
#[derive(Debug)]
pub struct WorkerPool {
    handles: Vec<JoinHandle<SyncStats>>,
}

impl WorkerPool {
    /// Spawn `workers` worker tasks draining `queue`
    pub fn spawn(queue: Arc<TaskQueue>, reporter: EventReporter, workers: usize) -> Self {
        let handles = (0..workers)
            .map(|id| {
                let queue = Arc::clone(&queue);
                let reporter = reporter.clone();
                tokio::spawn(Self::run_worker(id, queue, reporter))
            })
            .collect();

        Self { handles }
    }

    /// Number of workers in the pool
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether the pool has no workers
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every worker to terminate and merge their statistics
    pub async fn join(self) -> SyncStats {
        let mut stats = SyncStats::new();
        for result in futures::future::join_all(self.handles).await {
            match result {
                Ok(worker_stats) => stats.merge(&worker_stats),
                Err(e) => {
                    warn!("Worker task failed to join: {}", e);
                    stats.failed_tasks += 1;
                }
            }
        }
        stats
    }

    async fn run_worker(id: usize, queue: Arc<TaskQueue>, reporter: EventReporter) -> SyncStats {
        let detector = ChangeDetector::new();
        let copier = FileCopier::new();
        let mut stats = SyncStats::new();

        loop {
            let task = match queue.dequeue().await {
                Some(QueueItem::Task(task)) => task,
                Some(QueueItem::Shutdown) | None => {
                    debug!("Worker {} terminating", id);
                    break;
                }
            };

            match Self::process(&detector, &copier, &task).await {
                Ok(Some(bytes)) => {
                    stats.files_copied += 1;
                    stats.bytes_copied += bytes;
                    reporter.copied(task.source.clone(), task.destination.clone());
                }
                Ok(None) => stats.files_skipped += 1,
                Err(e) => {
                    warn!("Task failed for '{}': {}", task.source.display(), e);
                    stats.failed_tasks += 1;
                    reporter.failed(task.source.clone(), e.to_string());
                }
            }

            // Unconditional: the drain counter must see failed tasks too.
            queue.mark_done();
        }

        stats
    }

    /// Process one task; `Some(bytes)` if copied, `None` if skipped
    async fn process(
        detector: &ChangeDetector,
        copier: &FileCopier,
        task: &SyncTask,
    ) -> Result<Option<u64>> {
        match detector.decide(&task.source, &task.destination).await? {
            CopyDecision::Skip => Ok(None),
            CopyDecision::CopyRequired => {
                let bytes = copier.copy(&task.source, &task.destination).await?;
                Ok(Some(bytes))
            }
        }
    }
}
