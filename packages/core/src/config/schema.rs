//! Configuration schema for servicify
//!
//! Defines the structure and defaults for the optional config.json file.
//! Restart policy and log routing are not configurable; they are fixed in
//! the unit template.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration structure for servicify
///
/// Read from `~/.config/servicify/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version for migrations
    pub version: u32,

    /// Directory systemd loads system units from (default: /etc/systemd/system)
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,

    /// Where `setup` copies the servicify binary (default: /usr/local/bin/servicify)
    #[serde(default = "default_install_path")]
    pub install_path: PathBuf,

    /// Interpreter looked up on PATH when `--interpreter` is not given (default: node)
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Environment file name inside the app directory (default: .env)
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Lines of history shown by `logs` before following (default: 50)
    #[serde(default = "default_log_lines")]
    pub log_lines: u32,
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_install_path() -> PathBuf {
    PathBuf::from("/usr/local/bin/servicify")
}

fn default_interpreter() -> String {
    "node".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_log_lines() -> u32 {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            unit_dir: default_unit_dir(),
            install_path: default_install_path(),
            interpreter: default_interpreter(),
            env_file: default_env_file(),
            log_lines: default_log_lines(),
        }
    }
}
