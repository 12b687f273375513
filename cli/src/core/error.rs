//! # Coldpack Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module defines the error types used throughout the coldpack
//! application. The archive pipeline refuses to run whenever a precondition
//! does not hold, and each refusal carries a stable message text that
//! operators and tests match on, so the variants here are part of the
//! public contract, not an implementation detail.
//!
//! ## Architecture
//!
//! The error system consists of two components:
//! - `ColdpackError`: A custom error enum using `thiserror` for the
//!   specific failure kinds of the archive pipeline plus ambient
//!   configuration/filesystem errors.
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error
//!   handling and context chaining.
//!
//! Precondition failures (`SourceMissing`, the three `*Exists` variants)
//! leave the filesystem untouched. `PackingFailed` and `CompressionFailed`
//! surface a backend that produced nothing at its destination; in both
//! cases the pipeline stops and the last intermediate artifact stays on
//! disk for the operator to inspect.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! anyhow::bail!(ColdpackError::SourceMissing(path.display().to_string()));
//!
//! // Pattern matching on error types
//! match result {
//!     Ok(archive) => println!("Created {}", archive.display()),
//!     Err(e) if e.downcast_ref::<ColdpackError>().is_some_and(|ce| {
//!         matches!(ce, ColdpackError::StagingTargetExists(_))
//!     }) => {
//!         eprintln!("Leftover staging directory from a previous run");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for the coldpack application.
///
/// The display strings of the pipeline variants are load-bearing: callers
/// match on them verbatim.
#[derive(Error, Debug)]
pub enum ColdpackError {
    /// The path given for archiving does not exist on disk.
    #[error("There is no directory to archive: {0}")]
    SourceMissing(String),

    /// The derived staging path is already occupied, either by a leftover
    /// from an earlier failed run or by a suffix collision.
    #[error("Archive directory already exists: {0}")]
    StagingTargetExists(String),

    /// The derived container path is already occupied.
    #[error("Archive already exists: {0}")]
    ContainerTargetExists(String),

    /// The derived compressed path is already occupied.
    #[error("Compressed archive already exists: {0}")]
    CompressedTargetExists(String),

    /// The container backend returned a path with nothing on disk behind
    /// it. The staged path is left in place as a recovery point.
    #[error("Packing produced no archive at: {0}")]
    PackingFailed(String),

    /// The compression backend returned a path with nothing on disk behind
    /// it. The uncompressed container is left in place.
    #[error("Compression produced no archive at: {0}")]
    CompressionFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;
