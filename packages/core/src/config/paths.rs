//! XDG-style path resolution for servicify
//!
//! The config file lives at `~/.config/servicify/config.json`. When invoked
//! through sudo this is root's home, which is where privileged installs read
//! their defaults from.

use std::path::PathBuf;

/// Get the configuration directory path (`~/.config/servicify/`)
pub fn get_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join("servicify"))
}

/// Get the full path to the config file
///
/// Returns: `{config_dir}/config.json`
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|d| d.join("config.json"))
}
