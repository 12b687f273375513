//! # Coldpack Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module centralizes the filesystem primitives the archive pipeline
//! is built on. The pipeline never copies data around: staging is a single
//! rename, and cleanup removes exactly one staged path and one container
//! file. The wrappers here add error context and keep the directory-or-file
//! distinction out of the pipeline code.
//!
//! ## Architecture
//!
//! The module offers focused utility functions:
//! - **`move_path`**: Renames a path in one `fs::rename` call. The rename
//!   either happens entirely or not at all; there is no window where source
//!   and destination both hold partial content.
//! - **`remove_path_recursive`**: Removes a directory tree or a single
//!   file, whichever the path currently names. The staged path can be
//!   either, since single files are archivable too.
//! - **`remove_file`**: Removes one file.
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if absent,
//!   and rejects paths that exist but are not directories.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//! use crate::core::error::Result;
//! use std::path::Path;
//!
//! # fn run_example() -> Result<()> {
//! let source = Path::new("./export/TEST");
//! let staged = Path::new("./export/TEST_20160428101010");
//!
//! io::move_path(source, staged)?;
//! // ... pack the staged path ...
//! io::remove_path_recursive(staged)?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{ColdpackError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Moves (renames) a path to a new location in a single operation.
///
/// This is a thin wrapper over `std::fs::rename`, which maps to a single
/// rename syscall: both paths must live on the same filesystem, and the
/// operation never degrades into copy+delete.
///
/// # Arguments
///
/// * `src` - The existing path to move.
/// * `dst` - The destination path.
///
/// # Errors
///
/// Returns an `Err` if the rename fails (missing source, cross-device
/// destination, permissions), with context naming both paths.
pub fn move_path(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst)
        .with_context(|| format!("Failed to move {:?} to {:?}", src, dst))?;
    debug!("Moved {:?} to {:?}", src, dst);
    Ok(())
}

/// Removes a path that may be either a directory tree or a single file.
///
/// # Arguments
///
/// * `path` - The path to remove.
///
/// # Errors
///
/// Returns an `Err` if the path does not exist or removal fails.
pub fn remove_path_recursive(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory {:?}", path))?;
    } else {
        fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    }
    debug!("Removed {:?}", path);
    Ok(())
}

/// Removes a single file.
///
/// # Errors
///
/// Returns an `Err` if the file does not exist or cannot be removed.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).with_context(|| format!("Failed to remove file {:?}", path))?;
    debug!("Removed file {:?}", path);
    Ok(())
}

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function attempts to create the
/// directory, including any necessary parent directories (similar to
/// `mkdir -p`). If the path already exists but is not a directory (e.g.,
/// it's a file), an error (`ColdpackError::FileSystem`) is returned.
///
/// # Arguments
///
/// * `path` - A `&Path` reference to the directory path to ensure exists.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ColdpackError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}
