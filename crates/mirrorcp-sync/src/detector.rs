//! Content-based change detection

use crate::hasher::ContentHasher;
use mirrorcp_types::Result;
use std::path::Path;
use tracing::debug;

/// Outcome of comparing a source file against its mirrored destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyDecision {
    /// The destination is missing or its content differs; a copy is required
    CopyRequired,
    /// Source and destination content are identical
    Skip,
}

/// Decides whether a (source, destination) pair needs a copy
///
/// The decision is purely content-based: two files with identical bytes but
/// different timestamps are considered identical. A hash failure on either
/// side surfaces as an error rather than silently defaulting to either
/// decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    hasher: ContentHasher,
}

impl ChangeDetector {
    /// Create a new change detector
    pub fn new() -> Self {
        Self {
            hasher: ContentHasher::new(),
        }
    }

    /// Decide whether `source` must be copied over `destination`
    pub async fn decide<P: AsRef<Path>>(&self, source: P, destination: P) -> Result<CopyDecision> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        // A missing destination needs no hashing at all.
        match tokio::fs::metadata(destination).await {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(CopyDecision::CopyRequired)
            }
            Err(e) => return Err(e.into()),
            Ok(_) => {}
        }

        let source_digest = self.hasher.hash_file(source).await?;
        let destination_digest = self.hasher.hash_file(destination).await?;

        if source_digest == destination_digest {
            debug!("Unchanged: {}", source.display());
            Ok(CopyDecision::Skip)
        } else {
            Ok(CopyDecision::CopyRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_destination_requires_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("x.txt");
        let destination = temp_dir.path().join("mirror/x.txt");
        std::fs::write(&source, b"hello").unwrap();

        let decision = ChangeDetector::new()
            .decide(&source, &destination)
            .await
            .unwrap();
        assert_eq!(decision, CopyDecision::CopyRequired);
    }

    #[rstest]
    #[case(b"hello".as_slice(), b"hello".as_slice(), CopyDecision::Skip)]
    #[case(b"hello".as_slice(), b"world".as_slice(), CopyDecision::CopyRequired)]
    #[case(b"".as_slice(), b"".as_slice(), CopyDecision::Skip)]
    #[tokio::test]
    async fn test_content_comparison(
        #[case] source_content: &[u8],
        #[case] destination_content: &[u8],
        #[case] expected: CopyDecision,
    ) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src.txt");
        let destination = temp_dir.path().join("dst.txt");
        std::fs::write(&source, source_content).unwrap();
        std::fs::write(&destination, destination_content).unwrap();

        let decision = ChangeDetector::new()
            .decide(&source, &destination)
            .await
            .unwrap();
        assert_eq!(decision, expected);
    }

    #[tokio::test]
    async fn test_identical_content_different_mtime_skips() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src.txt");
        let destination = temp_dir.path().join("dst.txt");
        std::fs::write(&source, b"same content").unwrap();
        std::fs::write(&destination, b"same content").unwrap();

        // Push the destination's mtime a day into the past.
        let old = filetime::FileTime::from_unix_time(1_000_000, 0);
        filetime::set_file_mtime(&destination, old).unwrap();

        let decision = ChangeDetector::new()
            .decide(&source, &destination)
            .await
            .unwrap();
        assert_eq!(decision, CopyDecision::Skip);
    }

    #[tokio::test]
    async fn test_missing_source_surfaces_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("vanished.txt");
        let destination = temp_dir.path().join("dst.txt");
        std::fs::write(&destination, b"content").unwrap();

        let result = ChangeDetector::new().decide(&source, &destination).await;
        assert!(result.is_err());
    }
}
