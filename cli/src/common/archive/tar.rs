//! # Coldpack TAR Container Backend (`common::archive::tar`)
//!
//! File: cli/src/common/archive/tar.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module provides the container backend of the archive pipeline: it
//! writes an uncompressed TAR file from a staged path. The staged path may
//! be a directory tree (the common case) or a single file, since the
//! pipeline is content-type agnostic.
//!
//! ## Architecture
//!
//! The module leverages the `tar` crate for building the archive structure.
//!
//! - For a directory, its contents are added recursively with paths
//!   relative to the root of the archive.
//! - For a single file, the file is added under its own file name.
//! - The archive is written directly to the destination path, which is
//!   returned for the pipeline to verify and build on.
//!
//! Compression is deliberately not part of this backend; the pipeline
//! compresses the finished container in a separate step so the
//! uncompressed container is a complete artifact of its own.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{tar::TarPacker, Packer};
//! use std::path::Path;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let container = TarPacker.pack(
//!     Path::new("./export/TEST_20160428101010"),
//!     Path::new("./export/TEST_20160428101010.tar"),
//! )?;
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::Packer;
use crate::core::error::{ColdpackError, Result};
use anyhow::Context;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Container backend writing plain `.tar` files.
pub struct TarPacker;

impl Packer for TarPacker {
    /// Packs `source` (directory tree or single file) into a TAR archive
    /// at `dest` and returns the written path.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - The destination file cannot be created.
    /// - Any file or subdirectory within `source` cannot be added to the
    ///   archive (e.g., permissions issues).
    /// - Finishing the TAR archive structure fails.
    fn pack(&self, source: &Path, dest: &Path) -> Result<PathBuf> {
        let file = File::create(dest)
            .with_context(|| format!("Failed to create archive file {:?}", dest))?;
        let mut tar_builder = tar::Builder::new(file);

        if source.is_dir() {
            // "." keeps entry paths relative to the archive root, so the
            // staging suffix never leaks into the archived tree.
            tar_builder.append_dir_all(".", source).with_context(|| {
                format!(
                    "Failed to add directory '{}' contents to the tar archive",
                    source.display()
                )
            })?;
        } else {
            let name = source.file_name().ok_or_else(|| {
                ColdpackError::FileSystem(format!(
                    "Cannot determine archive entry name for {:?}",
                    source
                ))
            })?;
            tar_builder
                .append_path_with_name(source, name)
                .with_context(|| {
                    format!(
                        "Failed to add file '{}' to the tar archive",
                        source.display()
                    )
                })?;
        }

        // Finalize the TAR structure and flush the underlying file.
        tar_builder
            .into_inner()
            .context("Failed to finalize tar archive structure")?
            .sync_all()
            .with_context(|| format!("Failed to flush archive file {:?}", dest))?;

        Ok(dest.to_path_buf())
    }
}
