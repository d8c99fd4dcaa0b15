//! Config loading from explicit or default paths.

use crate::schema::ElystraConfig;
use crate::validation;
use elystra_common::ConfigError;
use std::path::Path;
use tracing::info;

use super::paths::{default_config_path, ensure_default_config};

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields,
/// then validates the result.
pub fn load_from_path(path: &Path) -> Result<ElystraConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
    })?;

    let config: ElystraConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    validation::validate(&config)?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/elystra/config.toml`
/// On Linux: `~/.config/elystra/config.toml`
///
/// A missing file is first created from the commented template, then loaded
/// like any other.
pub fn load_default() -> Result<ElystraConfig, ConfigError> {
    let path = default_config_path()?;
    ensure_default_config(&path)?;
    load_from_path(&path)
}
