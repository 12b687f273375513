//! # Coldpack Gzip Compression Backend (`common::archive::compression`)
//!
//! File: cli/src/common/archive/compression.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! The compression backend of the archive pipeline: streams the finished
//! container file through a gzip encoder into the final `.gz` artifact.
//! The container is read and written in a streaming copy, so memory usage
//! stays flat regardless of archive size.
//!
//! ## Architecture
//!
//! The module leverages the `flate2` crate. [`GzipPacker`] implements the
//! same [`Packer`] seam as the container backend: the pipeline does not
//! distinguish the two beyond their position in the step order.
//!
use crate::common::archive::Packer;
use crate::core::error::Result;
use anyhow::Context;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Compression backend writing `.gz` files.
pub struct GzipPacker {
    level: Compression,
}

impl GzipPacker {
    /// Creates a packer with an explicit compression level.
    #[allow(dead_code)]
    pub fn with_level(level: Compression) -> Self {
        GzipPacker { level }
    }
}

impl Default for GzipPacker {
    fn default() -> Self {
        GzipPacker {
            level: Compression::default(),
        }
    }
}

impl Packer for GzipPacker {
    /// Compresses the file at `source` into `dest` and returns the written
    /// path.
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - The source file cannot be opened.
    /// - The destination file cannot be created.
    /// - Streaming the data or finishing the gzip stream fails.
    fn pack(&self, source: &Path, dest: &Path) -> Result<PathBuf> {
        let mut input = File::open(source)
            .with_context(|| format!("Failed to open archive {:?} for compression", source))?;
        let output = File::create(dest)
            .with_context(|| format!("Failed to create compressed archive file {:?}", dest))?;

        let mut encoder = GzEncoder::new(output, self.level);
        io::copy(&mut input, &mut encoder)
            .with_context(|| format!("Failed to compress {:?} into {:?}", source, dest))?;
        encoder
            .finish()
            .context("Failed to finish gzip compression stream")?
            .sync_all()
            .with_context(|| format!("Failed to flush compressed archive file {:?}", dest))?;

        Ok(dest.to_path_buf())
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_pack_compresses_file() -> Result<()> {
        let temp_dir = tempdir()?;
        let src = temp_dir.path().join("data.tar");
        let content = "test1,test2,test3".repeat(100);
        fs::write(&src, &content)?;

        let dest = temp_dir.path().join("data.tar.gz");
        let written = GzipPacker::default().pack(&src, &dest)?;

        assert_eq!(written, dest);
        assert!(dest.is_file());

        // The gzip stream decodes back to the original container bytes.
        let mut decoder = GzDecoder::new(File::open(&dest)?);
        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded)?;
        assert_eq!(decoded, content);
        Ok(())
    }

    #[test]
    fn test_pack_missing_source_fails() {
        let temp_dir = tempdir().unwrap();
        let src = temp_dir.path().join("missing.tar");
        let dest = temp_dir.path().join("missing.tar.gz");

        let result = GzipPacker::default().pack(&src, &dest);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to open archive"));
    }
}
