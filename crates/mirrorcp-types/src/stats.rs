//! Statistics for synchronization runs
//!
//! Each worker accumulates its own [`SyncStats`]; the orchestrator merges
//! them into the run total when the pool shuts down.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transfer rate in bytes per second
pub type TransferRate = f64;

/// Synchronization statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of files skipped because their content was unchanged
    pub files_skipped: u64,
    /// Number of destination directories created (or confirmed) by the walk
    pub directories_created: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Number of tasks that failed (hash or copy error)
    pub failed_tasks: u64,
    /// Total duration of the run
    pub duration: Duration,
}

impl SyncStats {
    /// Create a new empty statistics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate the overall transfer rate
    pub fn transfer_rate(&self) -> TransferRate {
        if self.duration.as_secs_f64() > 0.0 {
            self.bytes_copied as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Merge statistics from another instance
    ///
    /// Durations are not summed: workers run concurrently, so the run
    /// duration is owned by the orchestrator.
    pub fn merge(&mut self, other: &SyncStats) {
        self.files_copied += other.files_copied;
        self.files_skipped += other.files_skipped;
        self.directories_created += other.directories_created;
        self.bytes_copied += other.bytes_copied;
        self.failed_tasks += other.failed_tasks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_counters() {
        let mut total = SyncStats::new();
        let mut worker = SyncStats::new();
        worker.files_copied = 7;
        worker.files_skipped = 2;
        worker.bytes_copied = 4096;
        worker.failed_tasks = 1;

        total.merge(&worker);
        total.merge(&worker);

        assert_eq!(total.files_copied, 14);
        assert_eq!(total.files_skipped, 4);
        assert_eq!(total.bytes_copied, 8192);
        assert_eq!(total.failed_tasks, 2);
    }

    #[test]
    fn test_merge_leaves_duration_alone() {
        let mut total = SyncStats::new();
        total.duration = Duration::from_secs(5);

        let mut worker = SyncStats::new();
        worker.duration = Duration::from_secs(3);

        total.merge(&worker);
        assert_eq!(total.duration, Duration::from_secs(5));
    }

    #[test]
    fn test_transfer_rate() {
        let mut stats = SyncStats::new();
        stats.bytes_copied = 1024;
        stats.duration = Duration::from_secs(2);

        assert_eq!(stats.transfer_rate(), 512.0);
    }
}
