//! Core type system and error handling for mirrorcp
//!
//! This crate provides the foundational types shared by every mirrorcp crate:
//!
//! - **Error handling**: Structured error types with fatal/per-task classification
//! - **Digest**: Fixed-length content hash used for change detection
//! - **Statistics**: Per-run and per-worker counters with merge support
//! - **Configuration values**: Validated wrappers such as [`ThreadCount`]
//!
//! # Examples
//!
//! ```rust
//! use mirrorcp_types::{Result, SyncStats};
//!
//! fn example_operation() -> Result<SyncStats> {
//!     let mut stats = SyncStats::new();
//!     stats.files_copied = 10;
//!     stats.bytes_copied = 1024 * 1024;
//!     Ok(stats)
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod digest;
pub mod error;
pub mod result;
pub mod stats;

// Re-export commonly used types
pub use config::ThreadCount;
pub use digest::Digest;
pub use error::{Error, ErrorKind};
pub use result::Result;
pub use stats::SyncStats;
