//! Streaming content hashing

use mirrorcp_types::{Digest, Error, Result};
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read chunk size for hashing; digests are independent of this value.
const HASH_CHUNK_SIZE: usize = 4096;

/// Computes BLAKE3 digests of file contents
///
/// Files are read in fixed-size chunks and folded into a running hash
/// accumulator, so memory use is independent of file size. A read failure
/// mid-stream aborts the digest; a partial digest is never returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHasher;

impl ContentHasher {
    /// Create a new content hasher
    pub fn new() -> Self {
        Self
    }

    /// Compute the digest of a file's byte content
    pub async fn hash_file<P: AsRef<Path>>(&self, path: P) -> Result<Digest> {
        let path = path.as_ref();

        let mut file = File::open(path)
            .await
            .map_err(|e| Error::hash(path, format!("failed to open: {}", e)))?;

        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; HASH_CHUNK_SIZE];

        loop {
            let read = file
                .read(&mut buffer)
                .await
                .map_err(|e| Error::hash(path, format!("read failed: {}", e)))?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(Digest::from(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_identical_content_identical_digest() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.txt");
        let b = temp_dir.path().join("b.txt");
        std::fs::write(&a, b"hello world").unwrap();
        std::fs::write(&b, b"hello world").unwrap();

        let hasher = ContentHasher::new();
        let digest_a = hasher.hash_file(&a).await.unwrap();
        let digest_b = hasher.hash_file(&b).await.unwrap();

        assert_eq!(digest_a, digest_b);
    }

    #[tokio::test]
    async fn test_streaming_matches_one_shot_hash() {
        // Content larger than one chunk, not chunk-aligned: the streaming
        // digest must equal hashing the whole buffer at once.
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.bin");
        std::fs::write(&path, &content).unwrap();

        let streamed = ContentHasher::new().hash_file(&path).await.unwrap();
        let one_shot = Digest::from(blake3::hash(&content));

        assert_eq!(streamed, one_shot);
    }

    #[tokio::test]
    async fn test_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();

        let digest = ContentHasher::new().hash_file(&path).await.unwrap();
        assert_eq!(digest, Digest::from(blake3::hash(b"")));
    }

    #[tokio::test]
    async fn test_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.txt");

        let result = ContentHasher::new().hash_file(&path).await;
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("missing.txt"));
    }
}
