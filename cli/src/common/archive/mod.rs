//! # Coldpack Archive Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module holds the archive pipeline and everything it is assembled
//! from: path derivation, the precondition checks, the backends that write
//! the container and compress it, and the event sink the pipeline reports
//! transitions through.
//!
//! ## Architecture
//!
//! - **`job`**: `ArchiveJob`, the pipeline itself: existence checks in a
//!   fixed order, then rename → pack → remove staged → compress → remove
//!   container, each step gated on the previous one.
//! - **`paths`**: Pure derivation of the staged/container/compressed paths
//!   from a source path and a suffix, plus the suffix strategies.
//! - **`events`**: `ArchiveEvent` transition records and the `EventSink`
//!   implementations that render them.
//! - **`tar`**: `TarPacker`, the container backend over the `tar` crate.
//! - **`compression`**: `GzipPacker`, the compression backend over `flate2`.
//!
//! The two backends hang off the same seam: the [`Packer`] trait defined
//! here. The job receives both as trait objects at construction, so tests
//! substitute fakes without touching the pipeline.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{compression::GzipPacker, job::ArchiveJob, tar::TarPacker};
//! use crate::common::archive::events::TracingSink;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let job = ArchiveJob::new(
//!     "./export/TEST",
//!     Box::new(TarPacker),
//!     Box::new(GzipPacker::default()),
//!     Box::new(TracingSink),
//! );
//! let compressed = job.run()?; // ./export/TEST_<timestamp>.tar.gz
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::Result;
use std::path::{Path, PathBuf};

pub mod compression;
pub mod events;
pub mod job;
pub mod paths;
pub mod tar;

/// The backend seam of the pipeline.
///
/// Both the container writer and the compressor have the same shape: take
/// a source path, produce an artifact at (or near) `dest`, and report the
/// path actually written. The pipeline trusts the returned path over its
/// own precomputed one, so a backend that adjusts the destination (for
/// example by appending its own extension) stays coherent with the steps
/// that follow.
pub trait Packer {
    /// Packs `source` into an artifact at `dest` and returns the realized
    /// artifact path.
    ///
    /// # Errors
    ///
    /// Backend-specific I/O failures. A backend may also "fail" by
    /// returning a path that does not exist on disk; the pipeline checks
    /// for that and stops.
    fn pack(&self, source: &Path, dest: &Path) -> Result<PathBuf>;
}
