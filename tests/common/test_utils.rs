//! Test utilities for temporary file handling
//!
//! Temporary paths live under the system temporary directory (respecting
//! TMPDIR, TEMP and TMP) and carry a per-process counter so parallel tests
//! never collide.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn get_temp_dir() -> PathBuf {
    env::var("TMPDIR")
        .or_else(|_| env::var("TEMP"))
        .or_else(|_| env::var("TMP"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir())
}

/// Generate a unique test file path
pub fn test_temp_path(test_name: &str, extension: &str) -> PathBuf {
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "tidyframe_test_{}_{}_{}.{}",
        test_name,
        std::process::id(),
        counter,
        extension
    );
    get_temp_dir().join(filename)
}

/// RAII wrapper for temporary test files; the file is deleted on drop
pub struct TempTestFile {
    path: PathBuf,
}

impl TempTestFile {
    pub fn new(test_name: &str, extension: &str) -> Self {
        TempTestFile {
            path: test_temp_path(test_name, extension),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempTestFile {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Write `content` to a fresh temporary file
pub fn create_test_file(test_name: &str, extension: &str, content: &str) -> TempTestFile {
    let temp_file = TempTestFile::new(test_name, extension);
    fs::write(temp_file.path(), content).expect("Failed to write test file");
    temp_file
}

/// Frames used across the verb tests
pub mod fixtures {
    use tidyframe::{Column, DataFrame};

    pub fn students() -> DataFrame {
        DataFrame::from_columns(vec![
            ("student_id", Column::from(vec![1i64, 2, 3, 4, 5])),
            ("name", Column::from(vec!["John", "Jane", "Jack", "Jill", "Jenny"])),
            ("grade", Column::from(vec![10i64, 8, 12, 9, 7])),
        ])
        .unwrap()
    }

    pub fn classes() -> DataFrame {
        DataFrame::from_columns(vec![
            ("class_id", Column::from(vec![1i64, 2, 2, 3, 3])),
            ("student_id", Column::from(vec![1i64, 2, 3, 6, 7])),
        ])
        .unwrap()
    }

    pub fn wide() -> DataFrame {
        DataFrame::from_columns(vec![
            ("idx", Column::from(vec![1i64, 2, 3])),
            ("A", Column::from(vec![1i64, 2, 3])),
            ("B", Column::from(vec![4i64, 5, 6])),
        ])
        .unwrap()
    }

    pub fn long() -> DataFrame {
        DataFrame::from_columns(vec![
            ("idx", Column::from(vec![1i64, 2, 3, 1, 2, 3])),
            ("name", Column::from(vec!["A", "A", "A", "B", "B", "B"])),
            ("value", Column::from(vec![1i64, 2, 3, 4, 5, 6])),
        ])
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_unique() {
        let path1 = test_temp_path("test", "csv");
        let path2 = test_temp_path("test", "csv");
        assert_ne!(path1, path2, "Paths should be unique");
    }

    #[test]
    fn test_temp_test_file_cleanup() {
        let path;
        {
            let temp_file = create_test_file("cleanup", "txt", "test data");
            path = temp_file.path().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists(), "File should be deleted after drop");
    }
}
