//! # Coldpack Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/coldpack
//!
//! ## Overview
//!
//! This module implements the configuration system for coldpack, handling
//! loading, merging, validation, and access to configuration data. The
//! archive core itself only consumes the final `ArchiveConfig` values; how
//! they were sourced is a concern of this module alone.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.coldpack.toml` in the current directory or ancestors
//! 2. User-specific `~/.config/coldpack/config.toml`
//! 3. Default values defined in the code
//!
//! Paths are expanded (`~` to home directory) and the result is validated
//! before use: the container and compression extensions must be plain
//! extension tokens, and the suffix format must be non-empty.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//!
//! let container_ext = &cfg.archive.container_extension;   // "tar"
//! let compression_ext = &cfg.archive.compression_extension; // "gz"
//! let log_file = cfg.archive.log_file.as_deref();
//! ```
//!
use crate::core::error::{ColdpackError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Configuration for the archive pipeline (`coldpack archive ...`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Extension appended to the staged path to name the container
    /// (staged path + "." + extension).
    #[serde(default = "default_container_extension")]
    pub container_extension: String,
    /// Extension appended to the container path to name the compressed
    /// artifact (container path + "." + extension).
    #[serde(default = "default_compression_extension")]
    pub compression_extension: String,
    /// chrono format string for the wall-clock archive suffix.
    #[serde(default = "default_suffix_format")]
    pub suffix_format: String,
    /// Optional log destination (can use ~). Will be expanded. When unset,
    /// transition messages go to the tracing subscriber only.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        ArchiveConfig {
            container_extension: default_container_extension(),
            compression_extension: default_compression_extension(),
            suffix_format: default_suffix_format(),
            log_file: None,
        }
    }
}

fn default_container_extension() -> String {
    "tar".to_string()
}
fn default_compression_extension() -> String {
    "gz".to_string()
}
fn default_suffix_format() -> String {
    // Renders as YYYYMMDDHHMMSS, e.g. 20160428101010.
    "%Y%m%d%H%M%S".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".coldpack.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Coldpack", "coldpack") {
        let config_dir = proj_dirs.config_dir();
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path()? {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!(
            "No project configuration file (.coldpack.toml) found in current directory or ancestors."
        );
        Ok(None)
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    let mut path: &Path = &current_dir;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        let git_dir = path.join(".git");
        if project_config.exists() && project_config.is_file() {
            return Ok(Some(project_config));
        }
        if git_dir.exists() && git_dir.is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return Ok(None);
        }
        match path.parent() {
            Some(parent) => path = parent,
            None => break,
        }
    }
    Ok(None)
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.archive.container_extension =
        if project_cfg.archive.container_extension != default_container_extension() {
            project_cfg.archive.container_extension
        } else {
            user.archive.container_extension
        };
    merged.archive.compression_extension =
        if project_cfg.archive.compression_extension != default_compression_extension() {
            project_cfg.archive.compression_extension
        } else {
            user.archive.compression_extension
        };
    merged.archive.suffix_format = if project_cfg.archive.suffix_format != default_suffix_format() {
        project_cfg.archive.suffix_format
    } else {
        user.archive.suffix_format
    };
    merged.archive.log_file = project_cfg.archive.log_file.or(user.archive.log_file);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    if let Some(log_file) = &config.archive.log_file {
        let expanded = shellexpand::tilde(log_file).into_owned();
        debug!("Expanded log file destination: {}", expanded);
        config.archive.log_file = Some(expanded);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    info!("Validating final configuration...");
    validate_extension("archive.container_extension", &config.archive.container_extension)?;
    validate_extension(
        "archive.compression_extension",
        &config.archive.compression_extension,
    )?;
    if config.archive.suffix_format.is_empty() {
        return Err(anyhow!(ColdpackError::Config(
            "archive.suffix_format must not be empty.".to_string()
        )));
    }
    if let Some(log_file) = &config.archive.log_file {
        if log_file.is_empty() {
            return Err(anyhow!(ColdpackError::Config(
                "archive.log_file must not be empty when set.".to_string()
            )));
        }
    }
    info!("Configuration validation successful.");
    Ok(())
}

fn validate_extension(field: &str, extension: &str) -> Result<()> {
    if extension.is_empty() {
        return Err(anyhow!(ColdpackError::Config(format!(
            "{} must not be empty.",
            field
        ))));
    }
    // Extensions are appended to derived paths; a separator or dot would
    // change which directory the artifact lands in or double-dot the name.
    if extension.contains(['/', '\\', '.']) {
        return Err(anyhow!(ColdpackError::Config(format!(
            "Invalid extension '{}' for {}. Expected a plain token like 'tar'.",
            extension, field
        ))));
    }
    Ok(())
}
