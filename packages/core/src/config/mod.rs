//! Configuration management for servicify
//!
//! Handles loading and validating the optional JSONC configuration file.
//! A missing file yields defaults and is never created implicitly.

pub mod paths;
pub mod schema;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jsonc_parser::parse_to_serde_value;

pub use paths::{get_config_dir, get_config_path};
pub use schema::Config;

/// Load configuration from the config file
///
/// Returns defaults if the file doesn't exist or no home directory is known.
/// Supports JSONC (JSON with comments).
/// Rejects unknown fields for strict validation.
pub fn load_config() -> Result<Config> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => {
            tracing::debug!("No home directory, using default config");
            Ok(Config::default())
        }
    }
}

/// Load configuration from an explicit path
pub fn load_config_from(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        tracing::debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    // Parse JSONC (JSON with comments)
    let parsed_value = parse_to_serde_value(&contents, &Default::default())
        .map_err(|e| anyhow::anyhow!("Invalid JSONC in config file: {}", e))?
        .ok_or_else(|| anyhow::anyhow!("Config file is empty"))?;

    // Deserialize into Config struct (deny_unknown_fields will reject unknown keys)
    let config: Config = serde_json::from_value(parsed_value).with_context(|| {
        format!(
            "Invalid configuration in {}. Check for unknown fields or invalid values.",
            config_path.display()
        )
    })?;

    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_file_yields_defaults_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(!path.exists());
    }

    #[test]
    fn test_jsonc_comments_are_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                // bun instead of node
                "version": 1,
                "interpreter": "bun",
                /* systemd reads both */
                "unit_dir": "/usr/lib/systemd/system"
            }"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.interpreter, "bun");
        assert_eq!(config.unit_dir, PathBuf::from("/usr/lib/systemd/system"));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"version": 1, "restart": "always"}"#).unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "").unwrap();

        assert!(load_config_from(&path).is_err());
    }
}
