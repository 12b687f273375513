//! # Coldpack Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the coldpack CLI and
//! makes them accessible to the application entry point (`main.rs`).
//!
//! ## Architecture
//!
//! Each command defines its own arguments structure and handler function.
//! Commands are thin collaborators around the archive core: they load
//! configuration, assemble the injected backends and sinks, construct an
//! `ArchiveJob`, and call `run()`; no archival logic lives here.
//!
//! ## Commands
//!
//! - `archive`: Stage a directory or file into a compressed tar archive.
//!

/// Command for staging a directory or file into a compressed archive.
pub mod archive;
