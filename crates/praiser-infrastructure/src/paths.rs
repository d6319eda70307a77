//! Unified path management for Praiser state on disk.
//!
//! All durable client-side state (configuration, the settings cache,
//! logs) lives under the platform's standard directories, resolved via
//! the `dirs` crate. This ensures consistency across Linux, macOS and
//! Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Praiser.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/praiser/           # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/praiser/      # Data directory
/// ├── cache/                   # Settings cache (one file per key)
/// └── logs/                    # Application logs
///     └── praiser.log.YYYY-MM-DD
/// ```
pub struct PraiserPaths;

impl PraiserPaths {
    /// Returns the Praiser configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/praiser/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("praiser"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the Praiser data directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to data directory (e.g., `~/.local/share/praiser/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("praiser"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the settings cache directory.
    pub fn cache_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("cache"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}
