//! File copying with metadata propagation

use mirrorcp_types::{Error, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Copies file content and propagates the source modification timestamp
///
/// The destination is created if absent and overwritten otherwise. The walk
/// guarantees the destination's parent directory exists before any task for
/// a file inside it is dequeued, so the copier never creates directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileCopier;

impl FileCopier {
    /// Create a new file copier
    pub fn new() -> Self {
        Self
    }

    /// Copy `source` to `destination`, returning the number of bytes copied
    pub async fn copy<P: AsRef<Path>>(&self, source: P, destination: P) -> Result<u64> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let bytes_copied = fs::copy(source, destination)
            .await
            .map_err(|e| Error::copy(source, destination, e.to_string()))?;

        let metadata = fs::metadata(source)
            .await
            .map_err(|e| Error::copy(source, destination, format!("metadata: {}", e)))?;

        if let Ok(modified) = metadata.modified() {
            filetime::set_file_mtime(destination, filetime::FileTime::from_system_time(modified))
                .map_err(|e| {
                    Error::copy(source, destination, format!("set modification time: {}", e))
                })?;
        }

        debug!("Copied: {} -> {}", source.display(), destination.display());
        Ok(bytes_copied)
    }
}
