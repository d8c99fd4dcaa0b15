//! Elystra configuration system.
//!
//! Provides TOML-based configuration for the site metadata, the presence
//! service endpoints, and the tracked team. All config sections use
//! defaults matching the public site, so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use elystra_config::{config_to_json, load_config};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod site;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    ContactLink, ElystraConfig, PresenceConfig, SiteConfig, TeamMemberConfig,
    CONFIG_SCHEMA_VERSION,
};
pub use site::{NotFoundPage, SiteMetadata};

use std::path::Path;

use elystra_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// The default path gets a commented default file on first run.
pub fn load_config(path: Option<&Path>) -> Result<ElystraConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &ElystraConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&ElystraConfig::default());
        assert!(json.contains("\"site\""));
        assert!(json.contains("\"presence\""));
        assert!(json.contains("\"team\""));
        assert!(json.contains("\"874898422233178142\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_with_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[site]\ntitle = \"Elystra\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.site.title, "Elystra");
    }
}
