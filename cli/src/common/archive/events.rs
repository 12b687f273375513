//! # Coldpack Archive Events (`common::archive::events`)
//!
//! File: cli/src/common/archive/events.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! The pipeline reports every transition and refusal as a structured
//! [`ArchiveEvent`] handed to an injected [`EventSink`]. Message formatting
//! lives in the event's `Display` implementation, not in the pipeline, so
//! the core stays testable without a real log file and the message texts
//! stay in one place. Operators match on these texts, so the wording is
//! fixed.
//!
//! ## Architecture
//!
//! - **`ArchiveEvent`**: one variant per transition (staged, packed,
//!   staged removed, compressed) plus the run frame (beginning/finished)
//!   and the four precondition refusals.
//! - **`EventSink`**: the append-only logger surface of the pipeline.
//! - Sinks: [`TracingSink`] (info-level tracing lines), [`LogFileSink`]
//!   (append-only file, the classic `archiver.log`), [`FanoutSink`]
//!   (several sinks at once).
//!
//! Sink failures must not abort an archive run that is otherwise healthy;
//! `LogFileSink` reports write problems as tracing warnings and carries on.
//!
use crate::common::fs::io;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A transition or refusal in the archive pipeline.
///
/// `Display` renders the exact operator-facing message for each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEvent {
    /// `run()` has started for this source.
    Beginning { source: PathBuf },
    /// The source path was absent; the run was refused.
    SourceMissing { source: PathBuf },
    /// The staging target was already occupied; the run was refused.
    StagingTargetExists { staged: PathBuf },
    /// The container target was already occupied; the run was refused.
    ContainerTargetExists { container: PathBuf },
    /// The compressed target was already occupied; the run was refused.
    CompressedTargetExists { compressed: PathBuf },
    /// The source was renamed to the staged path.
    Staged { source: PathBuf, staged: PathBuf },
    /// The staged path was packed into the container.
    Packed { staged: PathBuf, container: PathBuf },
    /// The staged path was removed after packing.
    StagedRemoved { staged: PathBuf },
    /// The container was compressed into the final artifact.
    Compressed {
        container: PathBuf,
        compressed: PathBuf,
    },
    /// `run()` completed without failure.
    Finished { source: PathBuf },
}

impl fmt::Display for ArchiveEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveEvent::Beginning { source } => {
                write!(f, "Beginning to archive {}", source.display())
            }
            ArchiveEvent::SourceMissing { source } => write!(
                f,
                "Archiver: The directory to archive: {} : does not exist, archiving will not take place",
                source.display()
            ),
            ArchiveEvent::StagingTargetExists { staged } => write!(
                f,
                "Archiver: The new directory for archiving: {} : already exists, archiving will not take place",
                staged.display()
            ),
            ArchiveEvent::ContainerTargetExists { container } => write!(
                f,
                "Archiver: The new archive: {} : already exists, archiving will not take place",
                container.display()
            ),
            ArchiveEvent::CompressedTargetExists { compressed } => write!(
                f,
                "Archiver: The new compressed archive: {} : already exists, archiving will not take place",
                compressed.display()
            ),
            ArchiveEvent::Staged { source, staged } => write!(
                f,
                "The directory {} has been moved to {} for archiving",
                source.display(),
                staged.display()
            ),
            ArchiveEvent::Packed { staged, container } => write!(
                f,
                "The directory {} has been archived into {}",
                staged.display(),
                container.display()
            ),
            ArchiveEvent::StagedRemoved { staged } => {
                write!(f, "The directory {} has been removed", staged.display())
            }
            ArchiveEvent::Compressed {
                container,
                compressed,
            } => write!(
                f,
                "The archive {} has been compressed into {}",
                container.display(),
                compressed.display()
            ),
            ArchiveEvent::Finished { source } => {
                write!(f, "Finished to archiving {}", source.display())
            }
        }
    }
}

/// Append-only sink for archive events.
///
/// Where the rendered lines end up (tracing, a log file, a test buffer) is
/// the caller's choice; the pipeline only appends.
pub trait EventSink {
    fn append(&self, event: &ArchiveEvent);
}

/// Sink that emits each event as an info-level tracing line.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn append(&self, event: &ArchiveEvent) {
        info!("{}", event);
    }
}

/// Sink that appends rendered events to a log file, one line each.
///
/// The parent directory is created on construction. Write failures are
/// reported as tracing warnings rather than errors: a broken log
/// destination must not abort an archive run mid-pipeline.
pub struct LogFileSink {
    path: PathBuf,
}

impl LogFileSink {
    /// Creates a sink writing to `path`, ensuring the parent directory
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if the parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> crate::core::error::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                io::ensure_dir_exists(parent)?;
            }
        }
        Ok(LogFileSink { path })
    }

    /// The log destination this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for LogFileSink {
    fn append(&self, event: &ArchiveEvent) {
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{}", event));
        if let Err(e) = result {
            warn!("Failed to append to log file {:?}: {}", self.path, e);
        }
    }
}

/// Sink that forwards each event to every inner sink in order.
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        FanoutSink { sinks }
    }
}

impl EventSink for FanoutSink {
    fn append(&self, event: &ArchiveEvent) {
        for sink in &self.sinks {
            sink.append(event);
        }
    }
}
