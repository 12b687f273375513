//! # Coldpack Archive Command (`commands::archive`)
//!
//! File: cli/src/commands/archive.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! Implements the `coldpack archive` command: the external trigger that
//! constructs an `ArchiveJob` from configuration and CLI arguments and
//! runs it. All archival semantics live in `common::archive`; this module
//! only wires collaborators together.
//!
//! ## Architecture
//!
//! The handler:
//! 1. Loads configuration (extensions, suffix format, log destination).
//! 2. Builds the event sink: tracing always, plus an append-only log file
//!    when a destination is configured or given on the command line.
//! 3. Picks the suffix strategy: a fixed literal from `--suffix` (useful
//!    for scripted runs needing predictable names), otherwise the
//!    configured wall-clock format.
//! 4. Constructs the job with the tar and gzip backends and runs it.
//!
//! ## Examples
//!
//! ```bash
//! # Archive a directory with a timestamp suffix
//! coldpack archive ./export/transferred/TEST
//!
//! # Deterministic naming and a log file
//! coldpack archive ./export/transferred/TEST \
//!     --suffix 20160428101010 --log-file ./archiver.log
//! ```
//!
use crate::common::archive::compression::GzipPacker;
use crate::common::archive::events::{EventSink, FanoutSink, LogFileSink, TracingSink};
use crate::common::archive::job::ArchiveJob;
use crate::common::archive::paths::{fixed_suffix, timestamp_suffix};
use crate::common::archive::tar::TarPacker;
use crate::core::config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Archive Command Arguments (`ArchiveArgs`)
///
/// Arguments for `coldpack archive`.
#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    /// The directory or file to archive.
    pub path: PathBuf,

    /// Fixed suffix to use instead of the configured timestamp format.
    #[arg(long)]
    pub suffix: Option<String>,

    /// Append transition messages to this log file (overrides the
    /// configured destination).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// # Handle Archive Command (`handle_archive`)
///
/// Assembles and runs one `ArchiveJob` for the given path.
///
/// ## Arguments
///
/// * `args`: The parsed `ArchiveArgs`.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after the compressed artifact was created and
///   reported on stdout; otherwise the pipeline's error, unmodified, so
///   the exact refusal text reaches the operator.
pub fn handle_archive(args: ArchiveArgs) -> Result<()> {
    let cfg = config::load_config()?;

    let mut sinks: Vec<Box<dyn EventSink>> = vec![Box::new(TracingSink)];
    let log_destination = args
        .log_file
        .clone()
        .or_else(|| cfg.archive.log_file.as_deref().map(PathBuf::from));
    if let Some(path) = &log_destination {
        info!("Appending archive log to {:?}", path);
        sinks.push(Box::new(LogFileSink::new(path)?));
    }

    let suffix = match &args.suffix {
        Some(literal) => fixed_suffix(literal.clone()),
        None => timestamp_suffix(cfg.archive.suffix_format.clone()),
    };

    let job = ArchiveJob::new(
        &args.path,
        Box::new(TarPacker),
        Box::new(GzipPacker::default()),
        Box::new(FanoutSink::new(sinks)),
    )
    .with_suffix_strategy(suffix)
    .with_container_extension(cfg.archive.container_extension)
    .with_compression_extension(cfg.archive.compression_extension);

    let compressed = job.run()?;
    println!("Created archive: {}", compressed.display());
    Ok(())
}
