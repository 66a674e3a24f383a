//! Shared task queue with drain tracking
//!
//! The queue is the only coordination point between the tree walker and the
//! workers. A task counts as outstanding from the moment it is enqueued
//! until the worker that dequeued it calls [`TaskQueue::mark_done`], which
//! closes the race where the queue looks empty while a copy is still in
//! flight. The outstanding count is published through a watch channel so
//! [`TaskQueue::wait_drained`] cannot miss the transition to zero.

use std::path::PathBuf;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::debug;

/// A single unit of work: mirror one source file to one destination path
///
/// Immutable once created, consumed exactly once by exactly one worker.
/// There is no identity beyond the path pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTask {
    /// Path of the file to read
    pub source: PathBuf,
    /// Path the file is mirrored to
    pub destination: PathBuf,
}

impl SyncTask {
    /// Create a new sync task
    pub fn new<P1: Into<PathBuf>, P2: Into<PathBuf>>(source: P1, destination: P2) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Item flowing through the queue: real work or a termination sentinel
#[derive(Debug)]
pub enum QueueItem {
    /// A file comparison/copy task
    Task(SyncTask),
    /// Poison pill; the worker that dequeues it exits its loop
    Shutdown,
}

/// Unbounded multi-consumer task queue with an outstanding-work counter
#[derive(Debug)]
pub struct TaskQueue {
    tx: mpsc::UnboundedSender<QueueItem>,
    rx: Mutex<mpsc::UnboundedReceiver<QueueItem>>,
    outstanding: watch::Sender<usize>,
}

impl TaskQueue {
    /// Create a new empty queue
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (outstanding, _) = watch::channel(0);

        Self {
            tx,
            rx: Mutex::new(rx),
            outstanding,
        }
    }

    /// Enqueue a task; never blocks the producer
    pub fn enqueue(&self, task: SyncTask) {
        // Increment before send: a worker must never observe the task
        // without the counter accounting for it.
        self.outstanding.send_modify(|n| *n += 1);
        if self.tx.send(QueueItem::Task(task)).is_err() {
            // The receiver lives in this struct; the channel can only close
            // once the queue itself is being torn down.
            self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
        }
    }

    /// Dequeue the next item, waiting until one is available
    ///
    /// Returns `None` only if the queue has been torn down.
    pub async fn dequeue(&self) -> Option<QueueItem> {
        self.rx.lock().await.recv().await
    }

    /// Record completion of a previously dequeued task
    ///
    /// Must be called exactly once per dequeued [`QueueItem::Task`],
    /// including tasks that failed; a missing call leaves the queue
    /// permanently undrained.
    pub fn mark_done(&self) {
        self.outstanding.send_modify(|n| *n = n.saturating_sub(1));
    }

    /// Number of tasks currently pending or in flight
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Wait until every enqueued task has been marked done
    ///
    /// Returns immediately if the queue never held work. Callers must
    /// ensure no further tasks are enqueued once this returns.
    pub async fn wait_drained(&self) {
        let mut rx = self.outstanding.subscribe();
        // wait_for inspects the current value first, so the zero state is
        // never missed between subscribing and awaiting. The sender lives
        // in self, so the channel cannot close while we hold &self.
        let _ = rx.wait_for(|&n| n == 0).await;
    }

    /// Enqueue one termination sentinel per worker
    ///
    /// Sentinels do not count as outstanding work; they are sent after the
    /// drain so every worker sees exactly one.
    pub fn shutdown(&self, workers: usize) {
        debug!("Enqueuing {} shutdown sentinels", workers);
        for _ in 0..workers {
            let _ = self.tx.send(QueueItem::Shutdown);
        }
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn task(n: usize) -> SyncTask {
        SyncTask::new(format!("/src/{n}"), format!("/dst/{n}"))
    }

    #[tokio::test]
    async fn test_wait_drained_on_empty_queue_returns_immediately() {
        let queue = TaskQueue::new();
        queue.wait_drained().await;
        assert_eq!(queue.outstanding(), 0);
    }

    #[tokio::test]
    async fn test_task_outstanding_until_marked_done() {
        let queue = TaskQueue::new();
        queue.enqueue(task(0));
        assert_eq!(queue.outstanding(), 1);

        let item = queue.dequeue().await.unwrap();
        assert!(matches!(item, QueueItem::Task(_)));
        // Dequeued but not done: still outstanding.
        assert_eq!(queue.outstanding(), 1);

        queue.mark_done();
        assert_eq!(queue.outstanding(), 0);
        queue.wait_drained().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_every_task_marked_done_exactly_once_under_load() {
        const TASKS: usize = 1000;
        const WORKERS: usize = 8;

        let queue = Arc::new(TaskQueue::new());
        let completions = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..WORKERS {
            let queue = Arc::clone(&queue);
            let completions = Arc::clone(&completions);
            handles.push(tokio::spawn(async move {
                loop {
                    match queue.dequeue().await {
                        Some(QueueItem::Task(_)) => {
                            completions.fetch_add(1, Ordering::SeqCst);
                            queue.mark_done();
                        }
                        Some(QueueItem::Shutdown) | None => break,
                    }
                }
            }));
        }

        for n in 0..TASKS {
            queue.enqueue(task(n));
        }

        queue.wait_drained().await;
        // Drained implies every task was completed exactly once.
        assert_eq!(completions.load(Ordering::SeqCst), TASKS);
        assert_eq!(queue.outstanding(), 0);

        queue.shutdown(WORKERS);
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(completions.load(Ordering::SeqCst), TASKS);
    }

    #[tokio::test]
    async fn test_one_sentinel_terminates_one_worker() {
        const WORKERS: usize = 4;

        let queue = Arc::new(TaskQueue::new());
        let mut handles = Vec::new();
        for _ in 0..WORKERS {
            let queue = Arc::clone(&queue);
            handles.push(tokio::spawn(async move {
                loop {
                    match queue.dequeue().await {
                        Some(QueueItem::Task(_)) => queue.mark_done(),
                        Some(QueueItem::Shutdown) | None => break,
                    }
                }
            }));
        }

        queue.shutdown(WORKERS);
        // All workers exit; fewer sentinels would hang this join.
        for handle in handles {
            handle.await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_sentinels_do_not_count_as_outstanding() {
        let queue = TaskQueue::new();
        queue.shutdown(3);
        assert_eq!(queue.outstanding(), 0);
        queue.wait_drained().await;
    }
}
