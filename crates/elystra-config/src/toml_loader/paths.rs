//! Config path resolution and first-run file creation.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use elystra_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// `<config_dir>/elystra/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("elystra").join("config.toml"))
}

/// Write the commented default config to `path` unless a file is already there.
///
/// Returns `true` when the file was created. An existing file is never
/// touched, even if another process created it after the caller checked.
pub fn ensure_default_config(path: &Path) -> Result<bool, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "failed to create {}: {e}",
                path.display()
            )))
        }
    };

    file.write_all(default_config_toml().as_bytes()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!(path = %path.display(), "Created default config");
    Ok(true)
}
