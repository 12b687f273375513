//! # Coldpack Archive Pipeline (`common::archive::job`)
//!
//! File: cli/src/common/archive/job.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! [`ArchiveJob`] is the archiver itself: it stages a directory (or single
//! file) out of its active location, packs it into a container, compresses
//! the container, and removes the intermediates, refusing to start if any
//! target path is already occupied. A source that was archived is gone
//! from its original path; a source that could not be archived is exactly
//! where it was.
//!
//! ## Architecture
//!
//! One `run()` invocation walks the job through its gates in a fixed order:
//!
//! 1. Precondition checks: the source must exist; the staged, container,
//!    and compressed paths must not. The checks run before any mutation,
//!    in exactly this order, and the first failure aborts the run. Each
//!    refusal is appended to the event sink and surfaced as a typed error.
//! 2. Pipeline: rename source → staged, pack staged → container, remove
//!    staged, compress container → compressed, remove container. Each step
//!    is gated on the success of the previous one. A backend that returns
//!    a path with nothing behind it stops the pipeline; whatever artifact
//!    the failed step received stays on disk for the operator to inspect.
//!    Recovery is manual: the job never deletes anything
//!    it did not itself just produce.
//!
//! The checks are advisory reads, not locks: between a check and the
//! mutation that relies on it another process can still win the path. The
//! job targets single, non-concurrent invocation (one scheduled run per
//! source); concurrent archiving is out of scope.
//!
//! Backends, suffix strategy, and the event sink are all injected at
//! construction, so tests run the full pipeline against fakes.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{
//!     compression::GzipPacker, events::TracingSink, job::ArchiveJob, tar::TarPacker,
//! };
//! use crate::common::archive::paths::fixed_suffix;
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let job = ArchiveJob::new(
//!     "./export/TEST",
//!     Box::new(TarPacker),
//!     Box::new(GzipPacker::default()),
//!     Box::new(TracingSink),
//! )
//! .with_suffix_strategy(fixed_suffix("20160428101010"));
//!
//! let compressed = job.run()?; // ./export/TEST_20160428101010.tar.gz
//! # Ok(())
//! # }
//! ```
//!
use crate::common::archive::events::{ArchiveEvent, EventSink};
use crate::common::archive::paths::{self, timestamp_suffix, DerivedPaths, SuffixStrategy};
use crate::common::archive::Packer;
use crate::common::fs::io;
use crate::core::error::{ColdpackError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONTAINER_EXTENSION: &str = "tar";
const DEFAULT_COMPRESSION_EXTENSION: &str = "gz";
const DEFAULT_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S";

/// One archival unit of work: a source path plus the injected collaborators
/// needed to stage, pack, and compress it.
///
/// A job is constructed fresh per invocation and holds no state between
/// runs; re-invoking after a successful run fails on whichever derived
/// path the earlier run left occupied.
pub struct ArchiveJob {
    source: PathBuf,
    suffix: SuffixStrategy,
    container_extension: String,
    compression_extension: String,
    packer: Box<dyn Packer>,
    compressor: Box<dyn Packer>,
    sink: Box<dyn EventSink>,
}

impl ArchiveJob {
    /// Creates a job for `source` with the default naming scheme: a local
    /// wall-clock `YYYYMMDDHHMMSS` suffix, a `tar` container, and a `gz`
    /// compressed artifact.
    ///
    /// # Arguments
    ///
    /// * `source` - The directory or file to archive.
    /// * `packer` - Container backend (packs the staged path).
    /// * `compressor` - Compression backend (packs the container).
    /// * `sink` - Destination for transition/refusal events.
    pub fn new(
        source: impl Into<PathBuf>,
        packer: Box<dyn Packer>,
        compressor: Box<dyn Packer>,
        sink: Box<dyn EventSink>,
    ) -> Self {
        ArchiveJob {
            source: source.into(),
            suffix: timestamp_suffix(DEFAULT_SUFFIX_FORMAT),
            container_extension: DEFAULT_CONTAINER_EXTENSION.to_string(),
            compression_extension: DEFAULT_COMPRESSION_EXTENSION.to_string(),
            packer,
            compressor,
            sink,
        }
    }

    /// Replaces the suffix strategy, e.g. with a fixed literal for
    /// deterministic naming.
    pub fn with_suffix_strategy(mut self, strategy: SuffixStrategy) -> Self {
        self.suffix = strategy;
        self
    }

    /// Overrides the container extension (default `tar`).
    pub fn with_container_extension(mut self, extension: impl Into<String>) -> Self {
        self.container_extension = extension.into();
        self
    }

    /// Overrides the compression extension (default `gz`).
    pub fn with_compression_extension(mut self, extension: impl Into<String>) -> Self {
        self.compression_extension = extension.into();
        self
    }

    /// Runs the archival pipeline and returns the compressed artifact path.
    ///
    /// Appends a "Beginning" event first and a "Finished" event only when
    /// every check and step succeeded; a failed run never reports itself
    /// finished.
    ///
    /// # Errors
    ///
    /// Propagates precondition refusals (`SourceMissing`, the `*Exists`
    /// kinds) and pipeline failures (`PackingFailed`, `CompressionFailed`,
    /// filesystem errors). Nothing is downgraded to a warning.
    pub fn run(&self) -> Result<PathBuf> {
        self.sink.append(&ArchiveEvent::Beginning {
            source: self.source.clone(),
        });
        let compressed = self.archive()?;
        self.sink.append(&ArchiveEvent::Finished {
            source: self.source.clone(),
        });
        Ok(compressed)
    }

    /// Checks every precondition, then executes the pipeline steps.
    fn archive(&self) -> Result<PathBuf> {
        self.check_source()?;

        let suffix = (self.suffix)();
        let derived = paths::derive(
            &self.source,
            &suffix,
            &self.container_extension,
            &self.compression_extension,
        );
        debug!(
            "Derived archive paths: staged={:?} container={:?} compressed={:?}",
            derived.staged, derived.container, derived.compressed
        );

        self.check_staging_target(&derived.staged)?;
        self.check_container_target(&derived.container)?;
        self.check_compressed_target(&derived.compressed)?;

        self.execute(&derived)
    }

    /// The mutation phase. Runs only after all four checks passed.
    fn execute(&self, derived: &DerivedPaths) -> Result<PathBuf> {
        // Stage: one atomic rename out of the active location.
        io::move_path(&self.source, &derived.staged)?;
        self.sink.append(&ArchiveEvent::Staged {
            source: self.source.clone(),
            staged: derived.staged.clone(),
        });

        // Pack. The backend's returned path wins over the precomputed one.
        // On failure the staged path stays on disk as a recovery point.
        let container = self.packer.pack(&derived.staged, &derived.container)?;
        if !container.exists() {
            anyhow::bail!(ColdpackError::PackingFailed(
                container.display().to_string()
            ));
        }
        self.sink.append(&ArchiveEvent::Packed {
            staged: derived.staged.clone(),
            container: container.clone(),
        });

        io::remove_path_recursive(&derived.staged)?;
        self.sink.append(&ArchiveEvent::StagedRemoved {
            staged: derived.staged.clone(),
        });

        // Compress. On failure the container stays on disk.
        let compressed = self.compressor.pack(&container, &derived.compressed)?;
        if !compressed.exists() {
            anyhow::bail!(ColdpackError::CompressionFailed(
                compressed.display().to_string()
            ));
        }
        self.sink.append(&ArchiveEvent::Compressed {
            container: container.clone(),
            compressed: compressed.clone(),
        });

        // Remove the uncompressed container. This final removal has no
        // event, matching the long-standing log format.
        io::remove_file(&container)?;

        Ok(compressed)
    }

    /// The source must exist (file or directory).
    fn check_source(&self) -> Result<()> {
        if self.source.exists() {
            return Ok(());
        }
        self.sink.append(&ArchiveEvent::SourceMissing {
            source: self.source.clone(),
        });
        anyhow::bail!(ColdpackError::SourceMissing(
            self.source.display().to_string()
        ))
    }

    /// The staging target must not exist yet.
    fn check_staging_target(&self, staged: &Path) -> Result<()> {
        if !staged.exists() {
            return Ok(());
        }
        self.sink.append(&ArchiveEvent::StagingTargetExists {
            staged: staged.to_path_buf(),
        });
        anyhow::bail!(ColdpackError::StagingTargetExists(
            staged.display().to_string()
        ))
    }

    /// The container target must not exist yet.
    fn check_container_target(&self, container: &Path) -> Result<()> {
        if !container.exists() {
            return Ok(());
        }
        self.sink.append(&ArchiveEvent::ContainerTargetExists {
            container: container.to_path_buf(),
        });
        anyhow::bail!(ColdpackError::ContainerTargetExists(
            container.display().to_string()
        ))
    }

    /// The compressed target must not exist yet.
    fn check_compressed_target(&self, compressed: &Path) -> Result<()> {
        if !compressed.exists() {
            return Ok(());
        }
        self.sink.append(&ArchiveEvent::CompressedTargetExists {
            compressed: compressed.to_path_buf(),
        });
        anyhow::bail!(ColdpackError::CompressedTargetExists(
            compressed.display().to_string()
        ))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::compression::GzipPacker;
    use crate::common::archive::paths::fixed_suffix;
    use crate::common::archive::tar::TarPacker;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Sink that records rendered event lines for assertions.
    #[derive(Clone, Default)]
    struct RecordingSink(Arc<Mutex<Vec<String>>>);

    impl RecordingSink {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn append(&self, event: &ArchiveEvent) {
            self.0.lock().unwrap().push(event.to_string());
        }
    }

    /// Backend that claims success but writes nothing to disk.
    struct NoOutputPacker;

    impl Packer for NoOutputPacker {
        fn pack(&self, _source: &Path, dest: &Path) -> Result<PathBuf> {
            Ok(dest.to_path_buf())
        }
    }

    /// Backend that writes the artifact somewhere other than the requested
    /// destination and reports where.
    struct RelocatingPacker;

    impl Packer for RelocatingPacker {
        fn pack(&self, _source: &Path, dest: &Path) -> Result<PathBuf> {
            let mut relocated = dest.as_os_str().to_os_string();
            relocated.push(".real");
            let relocated = PathBuf::from(relocated);
            fs::write(&relocated, "container")?;
            Ok(relocated)
        }
    }

    fn setup_source_dir(base: &Path) -> PathBuf {
        let source = base.join("TEST");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("test.csv"), "test1,test2,test3").unwrap();
        fs::write(source.join("test2.csv"), "test1,test2,test3").unwrap();
        source
    }

    fn real_job(source: &Path, suffix: &str, sink: RecordingSink) -> ArchiveJob {
        ArchiveJob::new(
            source,
            Box::new(TarPacker),
            Box::new(GzipPacker::default()),
            Box::new(sink),
        )
        .with_suffix_strategy(fixed_suffix(suffix))
    }

    /// Successful directory run: the source and both intermediates are
    /// gone, only the compressed artifact remains, and it is non-empty.
    #[test]
    fn test_archive_directory_success() -> Result<()> {
        let base = tempdir()?;
        let source = setup_source_dir(base.path());
        let sink = RecordingSink::default();

        let compressed = real_job(&source, "20160428101010", sink.clone()).run()?;

        assert_eq!(compressed, base.path().join("TEST_20160428101010.tar.gz"));
        assert!(!source.exists());
        assert!(!base.path().join("TEST_20160428101010").exists());
        assert!(!base.path().join("TEST_20160428101010.tar").exists());
        assert!(compressed.is_file());
        assert!(fs::metadata(&compressed)?.len() > 0);
        Ok(())
    }

    /// The event sequence of a successful run, in order.
    #[test]
    fn test_archive_success_event_sequence() -> Result<()> {
        let base = tempdir()?;
        let source = setup_source_dir(base.path());
        let sink = RecordingSink::default();

        real_job(&source, "20160428101010", sink.clone()).run()?;

        let staged = base.path().join("TEST_20160428101010");
        let container = base.path().join("TEST_20160428101010.tar");
        let compressed = base.path().join("TEST_20160428101010.tar.gz");
        assert_eq!(
            sink.lines(),
            vec![
                format!("Beginning to archive {}", source.display()),
                format!(
                    "The directory {} has been moved to {} for archiving",
                    source.display(),
                    staged.display()
                ),
                format!(
                    "The directory {} has been archived into {}",
                    staged.display(),
                    container.display()
                ),
                format!("The directory {} has been removed", staged.display()),
                format!(
                    "The archive {} has been compressed into {}",
                    container.display(),
                    compressed.display()
                ),
                format!("Finished to archiving {}", source.display()),
            ]
        );
        Ok(())
    }

    /// Archiving a single file works the same way as a directory.
    #[test]
    fn test_archive_single_file_success() -> Result<()> {
        let base = tempdir()?;
        let source = base.path().join("test3.log");
        fs::write(&source, "LOGS")?;
        let sink = RecordingSink::default();

        let compressed = real_job(&source, "2016042810101_log", sink).run()?;

        assert_eq!(
            compressed,
            base.path().join("test3.log_2016042810101_log.tar.gz")
        );
        assert!(!source.exists());
        assert!(!base.path().join("test3.log_2016042810101_log").exists());
        assert!(!base.path().join("test3.log_2016042810101_log.tar").exists());
        assert!(compressed.is_file());
        Ok(())
    }

    /// Missing source: typed error with the exact text, zero mutations,
    /// refusal line in the sink, and no "Finished" line.
    #[test]
    fn test_missing_source() {
        let base = tempdir().unwrap();
        let source = base.path().join("TEST");
        let sink = RecordingSink::default();

        let err = real_job(&source, "20160428101010", sink.clone())
            .run()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ColdpackError>().unwrap().to_string(),
            format!("There is no directory to archive: {}", source.display())
        );
        let lines = sink.lines();
        assert!(lines
            .iter()
            .any(|l| l.contains("does not exist, archiving will not take place")));
        assert!(!lines.iter().any(|l| l.starts_with("Finished")));
        assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    }

    /// Pre-existing staging target: refused before any mutation.
    #[test]
    fn test_staging_target_exists() {
        let base = tempdir().unwrap();
        let source = setup_source_dir(base.path());
        let staged = base.path().join("TEST_20160428101010");
        fs::create_dir(&staged).unwrap();
        let sink = RecordingSink::default();

        let err = real_job(&source, "20160428101010", sink.clone())
            .run()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ColdpackError>().unwrap().to_string(),
            format!("Archive directory already exists: {}", staged.display())
        );
        // The source is untouched.
        assert!(source.join("test.csv").exists());
        assert!(sink
            .lines()
            .iter()
            .any(|l| l.contains("The new directory for archiving")));
    }

    /// Pre-existing container target: refused before any mutation.
    #[test]
    fn test_container_target_exists() {
        let base = tempdir().unwrap();
        let source = setup_source_dir(base.path());
        let container = base.path().join("TEST_20160428101010.tar");
        fs::write(&container, "test").unwrap();
        let sink = RecordingSink::default();

        let err = real_job(&source, "20160428101010", sink)
            .run()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ColdpackError>().unwrap().to_string(),
            format!("Archive already exists: {}", container.display())
        );
        assert!(source.join("test.csv").exists());
    }

    /// Pre-existing compressed target: refused before any mutation.
    #[test]
    fn test_compressed_target_exists() {
        let base = tempdir().unwrap();
        let source = setup_source_dir(base.path());
        let compressed = base.path().join("TEST_20160428101010.tar.gz");
        fs::write(&compressed, "test").unwrap();
        let sink = RecordingSink::default();

        let err = real_job(&source, "20160428101010", sink)
            .run()
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ColdpackError>().unwrap().to_string(),
            format!(
                "Compressed archive already exists: {}",
                compressed.display()
            )
        );
        assert!(source.join("test.csv").exists());
    }

    /// Re-running with the same suffix after a success is refused on the
    /// derived path the first run left occupied.
    #[test]
    fn test_rerun_after_success_detects_leftover() -> Result<()> {
        let base = tempdir()?;
        let source = setup_source_dir(base.path());
        real_job(&source, "20160428101010", RecordingSink::default()).run()?;

        // The caller recreates the source and retries with the same inputs.
        setup_source_dir(base.path());
        let err = real_job(&source, "20160428101010", RecordingSink::default())
            .run()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ColdpackError>().unwrap(),
            ColdpackError::CompressedTargetExists(_)
        ));
        Ok(())
    }

    /// A packer that produces nothing stops the pipeline; the staged path
    /// stays on disk as the recovery point, and nothing reports "Finished".
    #[test]
    fn test_packing_failure_leaves_staged_path() {
        let base = tempdir().unwrap();
        let source = setup_source_dir(base.path());
        let sink = RecordingSink::default();

        let job = ArchiveJob::new(
            &source,
            Box::new(NoOutputPacker),
            Box::new(GzipPacker::default()),
            Box::new(sink.clone()),
        )
        .with_suffix_strategy(fixed_suffix("20160428101010"));
        let err = job.run().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ColdpackError>().unwrap(),
            ColdpackError::PackingFailed(_)
        ));
        let staged = base.path().join("TEST_20160428101010");
        assert!(!source.exists());
        assert!(staged.join("test.csv").exists());
        assert!(!sink.lines().iter().any(|l| l.starts_with("Finished")));
    }

    /// A compressor that produces nothing stops the pipeline after the
    /// staged path was already cleaned up; the container remains.
    #[test]
    fn test_compression_failure_leaves_container() {
        let base = tempdir().unwrap();
        let source = setup_source_dir(base.path());

        let job = ArchiveJob::new(
            &source,
            Box::new(TarPacker),
            Box::new(NoOutputPacker),
            Box::new(RecordingSink::default()),
        )
        .with_suffix_strategy(fixed_suffix("20160428101010"));
        let err = job.run().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ColdpackError>().unwrap(),
            ColdpackError::CompressionFailed(_)
        ));
        assert!(!base.path().join("TEST_20160428101010").exists());
        assert!(base.path().join("TEST_20160428101010.tar").exists());
        assert!(!base.path().join("TEST_20160428101010.tar.gz").exists());
    }

    /// The pipeline trusts the container path the backend returns over the
    /// one it precomputed, through compression and final cleanup.
    #[test]
    fn test_backend_returned_path_is_trusted() -> Result<()> {
        let base = tempdir()?;
        let source = setup_source_dir(base.path());

        let job = ArchiveJob::new(
            &source,
            Box::new(RelocatingPacker),
            Box::new(GzipPacker::default()),
            Box::new(RecordingSink::default()),
        )
        .with_suffix_strategy(fixed_suffix("20160428101010"));
        let compressed = job.run()?;

        // The relocated container was compressed and then removed.
        assert!(!base.path().join("TEST_20160428101010.tar.real").exists());
        assert_eq!(compressed, base.path().join("TEST_20160428101010.tar.gz"));
        assert!(compressed.is_file());
        Ok(())
    }

    /// Custom extensions flow through derivation into the artifacts.
    #[test]
    fn test_custom_extensions() -> Result<()> {
        let base = tempdir()?;
        let source = setup_source_dir(base.path());

        let job = ArchiveJob::new(
            &source,
            Box::new(TarPacker),
            Box::new(GzipPacker::default()),
            Box::new(RecordingSink::default()),
        )
        .with_suffix_strategy(fixed_suffix("1"))
        .with_container_extension("container")
        .with_compression_extension("gzip");
        let compressed = job.run()?;

        assert_eq!(compressed, base.path().join("TEST_1.container.gzip"));
        Ok(())
    }
}
