//! # Coldpack Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module is the root for the shared functionality of the coldpack
//! CLI: the archive pipeline and the filesystem primitives it runs on.
//! Keeping these under `common::` separates them from command-specific
//! logic (`commands::`) and core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`archive`**: The archive pipeline (`job`), path derivation
//!   (`paths`), transition events (`events`), and the container and
//!   compression backends (`tar`, `compression`).
//! - **`fs`**: Primitive filesystem operations (move, remove, ensure
//!   directory) with contextual errors.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{job::ArchiveJob, tar::TarPacker};
//! use crate::common::fs::io;
//! ```
//!

/// The archive pipeline, its backends, and its events.
pub mod archive;
/// Foundational filesystem operations.
pub mod fs;
