//! Common test utilities for integration tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Create a specified number of files with the given size (in bytes).
    pub fn create_files(&self, count: usize, size: usize) {
        for i in 0..count {
            let content = "x".repeat(size);
            fs::write(self.src.path().join(format!("file{}.txt", i)), content)
                .expect("Failed to write file");
        }
    }

    /// Create a nested directory structure with files.
    pub fn create_nested_structure(&self, depth: usize, files_per_level: usize) {
        let mut current_path = self.src.path().to_path_buf();
        for level in 0..depth {
            current_path = current_path.join(format!("level{}", level));
            fs::create_dir_all(&current_path).expect("Failed to create directory");
            for i in 0..files_per_level {
                fs::write(
                    current_path.join(format!("file{}.txt", i)),
                    format!("content at level {}", level),
                )
                .expect("Failed to write file");
            }
        }
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Every file below `root`, keyed by relative path, with its contents.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect(root, root, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<PathBuf, Vec<u8>>) {
    for entry in fs::read_dir(dir).expect("Failed to read directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).expect("Entry outside root");
            files.insert(
                relative.to_path_buf(),
                fs::read(&path).expect("Failed to read file"),
            );
        }
    }
}
