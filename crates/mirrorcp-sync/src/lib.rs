//! One-way directory synchronization engine for mirrorcp
//!
//! This crate mirrors a source directory tree into a destination directory,
//! copying only files that are new or whose content has changed:
//!
//! - **Content hashing**: streaming BLAKE3 digests detect changed files
//! - **Change detection**: content-based, never timestamp-based
//! - **Worker pool**: a fixed number of concurrent workers drain a shared
//!   task queue while the tree walk is still running
//! - **Drain protocol**: the orchestrator waits until every discovered task
//!   has been processed exactly once, then shuts workers down with one
//!   termination sentinel each
//!
//! # Examples
//!
//! ```rust,no_run
//! use mirrorcp_sync::{SyncEngine, SyncRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = SyncEngine::new();
//! let request = SyncRequest::new("source_dir", "dest_dir");
//! let report = engine.sync(request).await?;
//! println!("Copied {} files, skipped {}", report.stats.files_copied, report.stats.files_skipped);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod copier;
pub mod detector;
pub mod engine;
pub mod events;
pub mod hasher;
pub mod queue;
pub mod walker;
pub mod worker;

pub use copier::FileCopier;
pub use detector::{ChangeDetector, CopyDecision};
pub use engine::{SyncEngine, SyncOptions, SyncReport, SyncRequest};
pub use events::{CopyEvent, EventReporter};
pub use hasher::ContentHasher;
pub use queue::{SyncTask, TaskQueue};
pub use walker::{TreeWalker, WalkSummary};
pub use worker::WorkerPool;
