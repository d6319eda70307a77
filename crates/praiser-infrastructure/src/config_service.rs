//! Configuration loading from the platform config directory.

use crate::paths::PraiserPaths;
use praiser_core::PraiserError;
use praiser_core::config::AppConfig;

/// Loads the application configuration from the default path
/// (`~/.config/praiser/config.toml`).
///
/// A missing file yields the defaults; an unreadable or unparsable file
/// is an error the caller decides how to surface.
pub fn load_config() -> praiser_core::Result<AppConfig> {
    let path = PraiserPaths::config_file()
        .map_err(|e| PraiserError::config(format!("failed to resolve config path: {}", e)))?;
    AppConfig::load_from(&path)
}
