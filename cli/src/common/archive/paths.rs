//! # Coldpack Path Derivation (`common::archive::paths`)
//!
//! File: cli/src/common/archive/paths.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! Derives the three target paths of an archive run from the source path
//! and a suffix. Derivation is pure string building: no filesystem access
//! and no error conditions. Whether the derived paths are usable is the
//! precondition checker's concern, not this module's.
//!
//! The derivation appends to the full source name rather than replacing
//! its extension, so a file `test3.log` with suffix `2016042810101_log`
//! stages as `test3.log_2016042810101_log` and ends up as
//! `test3.log_2016042810101_log.tar.gz`.
//!
//! ## Architecture
//!
//! - **`derive`**: source + suffix + extensions → [`DerivedPaths`].
//! - **`SuffixStrategy`**: an injected closure producing the suffix, so
//!   callers pick between wall-clock time (`timestamp_suffix`) and a fixed
//!   literal (`fixed_suffix`) without the core knowing the difference.
//!
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Produces the suffix appended to the source name for one archive run.
///
/// The default is a wall-clock timestamp; tests inject a fixed literal so
/// derived names are deterministic.
pub type SuffixStrategy = Box<dyn Fn() -> String + Send + Sync>;

/// A suffix strategy formatting the current local time.
///
/// # Arguments
///
/// * `format` - chrono format string, e.g. `"%Y%m%d%H%M%S"`.
pub fn timestamp_suffix(format: impl Into<String>) -> SuffixStrategy {
    let format = format.into();
    Box::new(move || chrono::Local::now().format(&format).to_string())
}

/// A suffix strategy returning a fixed literal.
pub fn fixed_suffix(suffix: impl Into<String>) -> SuffixStrategy {
    let suffix = suffix.into();
    Box::new(move || suffix.clone())
}

/// The three target paths of one archive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedPaths {
    /// The source renamed out of its active location: `source + "_" + suffix`.
    pub staged: PathBuf,
    /// The uncompressed container: `staged + "." + container_ext`.
    pub container: PathBuf,
    /// The final artifact: `container + "." + compression_ext`.
    pub compressed: PathBuf,
}

/// Derives the staged, container, and compressed paths for `source`.
///
/// Pure concatenation on the OS string of `source`; never touches the
/// filesystem.
pub fn derive(
    source: &Path,
    suffix: &str,
    container_ext: &str,
    compression_ext: &str,
) -> DerivedPaths {
    let staged = append_to_path(source, &format!("_{}", suffix));
    let container = append_to_path(&staged, &format!(".{}", container_ext));
    let compressed = append_to_path(&container, &format!(".{}", compression_ext));
    DerivedPaths {
        staged,
        container,
        compressed,
    }
}

/// Appends `tail` to the final component of `path` byte-for-byte.
///
/// `Path::join` would treat the tail as a new component and
/// `Path::with_extension` would replace an existing extension; neither is
/// the naming scheme here.
fn append_to_path(path: &Path, tail: &str) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(tail);
    PathBuf::from(os)
}
