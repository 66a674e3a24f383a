//! Unified test utilities for mirrorcp integration tests
//!
//! Fixture helpers used across the integration suite to keep directory
//! setup consistent.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Generate deterministic pseudo-random test data
///
/// Deterministic so that content comparisons are reproducible across runs.
pub fn generate_test_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    for i in 0..size {
        data.push(((i * 7 + 13) % 256) as u8);
    }
    data
}

/// Create a file with the given content, creating parent directories
pub fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write test file");
    path.to_path_buf()
}

/// Create a source/destination directory pair inside a temp dir
pub fn sync_fixture(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let source = temp_dir.path().join("source");
    let destination = temp_dir.path().join("destination");
    fs::create_dir_all(&source).expect("Failed to create source directory");
    (source, destination)
}

/// Create a directory tree with `files_per_dir` files in each of
/// `dir_count` subdirectories, returning all created file paths
pub fn create_tree(root: &Path, dir_count: usize, files_per_dir: usize) -> Vec<PathBuf> {
    let mut created = Vec::new();
    for d in 0..dir_count {
        let dir = root.join(format!("dir{d:02}"));
        fs::create_dir_all(&dir).expect("Failed to create subdirectory");
        for f in 0..files_per_dir {
            let path = dir.join(format!("file{f:02}.dat"));
            let content = generate_test_data(512 + d * 31 + f);
            created.push(write_file(&path, &content));
        }
    }
    created
}

/// Assert that every file under `source` exists under `destination` with
/// byte-identical content
pub fn assert_mirrored(source: &Path, destination: &Path) {
    for entry in walk_files(source) {
        let relative = entry.strip_prefix(source).expect("path under source root");
        let mirrored = destination.join(relative);
        assert!(
            mirrored.is_file(),
            "missing mirrored file: {}",
            mirrored.display()
        );
        assert_eq!(
            fs::read(&entry).expect("read source file"),
            fs::read(&mirrored).expect("read mirrored file"),
            "content mismatch for {}",
            relative.display()
        );
    }
}

/// Collect every regular file under `root` recursively
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).expect("read_dir failed") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files
}
