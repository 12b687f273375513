//! # Coldpack CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs`
//! file in that directory is compiled as a separate test crate linked
//! against the `coldpack` binary.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

// Re-export common crates/modules needed by multiple test files
pub use assert_cmd::Command;

/// # Get Coldpack Command (`coldpack_cmd`)
///
/// Helper function to create an `assert_cmd::Command` instance pointing to
/// the compiled `coldpack` binary target for the current test run.
///
/// ## Panics
/// Panics if the `coldpack` binary cannot be found via `Command::cargo_bin`.
pub fn coldpack_cmd() -> Command {
    Command::cargo_bin("coldpack").expect("Failed to find coldpack binary for testing")
}

/// # Set Up Export Directory (`setup_export_dir`)
///
/// Creates the directory tree the archiver tests operate on: a `TEST`
/// directory holding two CSV files and one log file, mirroring a typical
/// transferred-export layout.
///
/// ## Returns
/// The path of the created `TEST` directory.
pub fn setup_export_dir(base: &Path) -> PathBuf {
    let dir = base.join("TEST");
    fs::create_dir_all(&dir).expect("Failed to create TEST directory");
    fs::write(dir.join("test.csv"), "test1,test2,test3").expect("Failed to write test.csv");
    fs::write(dir.join("test2.csv"), "test1,test2,test3").expect("Failed to write test2.csv");
    fs::write(dir.join("test3.log"), "LOGS").expect("Failed to write test3.log");
    dir
}
