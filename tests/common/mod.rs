//! Common test utilities module
//!
//! Temporary files with automatic cleanup, and the fixture frames shared by
//! several test files.

#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{create_test_file, fixtures, test_temp_path, TempTestFile};
