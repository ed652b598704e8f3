//! Service manager abstraction
//!
//! Registers services with the host init system and forwards lifecycle verbs
//! to it. systemd is the only implementation; all supervision, restart and
//! log capture belong to it.

pub mod command;
pub mod systemd;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::descriptor::ServiceDescriptor;
use crate::error::ServiceError;

pub use command::{CommandOutput, CommandRunner, SystemCommandRunner};
pub use systemd::{MANAGED_MARKER, SystemdManager, render_unit_file};

/// systemd's control tool
pub const SYSTEMCTL: &str = "systemctl";

/// systemd's journal reader
pub const JOURNALCTL: &str = "journalctl";

/// Result of a service installation
#[derive(Debug, Clone)]
pub struct InstallResult {
    /// Path to the unit file that was written
    pub unit_file_path: PathBuf,

    /// Name of the service (e.g., "web")
    pub service_name: String,

    /// Whether an existing unit file was overwritten
    pub replaced: bool,

    /// `systemctl is-active` right after start (e.g. "active", "activating")
    pub active_state: String,
}

/// Result of a service removal
#[derive(Debug, Clone)]
pub struct UninstallResult {
    pub unit_file_path: PathBuf,

    /// false when there was no unit file to delete
    pub removed: bool,
}

/// A unit written by servicify, as found in the unit directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedService {
    pub name: String,
    pub unit_file_path: PathBuf,
    /// `systemctl is-active` output
    pub active_state: String,
    /// `systemctl is-enabled` output
    pub enabled_state: String,
}

/// Trait for host service managers
///
/// Every operation addresses a service by name only; the unit file lives at
/// a predictable path derived from it.
pub trait ServiceManager: Send + Sync {
    /// Write the unit, reload the manager, then enable and start the service
    fn install(&self, descriptor: &ServiceDescriptor) -> Result<InstallResult, ServiceError>;

    /// Stop, disable, delete the unit file if present, and reload
    ///
    /// Removing a service that was never installed succeeds.
    fn uninstall(&self, name: &str) -> Result<UninstallResult, ServiceError>;

    fn start(&self, name: &str) -> Result<(), ServiceError>;

    fn stop(&self, name: &str) -> Result<(), ServiceError>;

    fn restart(&self, name: &str) -> Result<(), ServiceError>;

    /// Show the manager's status view on the terminal
    ///
    /// The manager's verdict on the service never turns into an error.
    fn status(&self, name: &str) -> Result<(), ServiceError>;

    /// Follow the service's log stream until interrupted
    fn follow_logs(&self, name: &str, lines: u32) -> Result<(), ServiceError>;

    /// Enumerate units carrying [`MANAGED_MARKER`], with their live state
    fn list(&self) -> Result<Vec<ManagedService>, ServiceError>;

    /// Current `is-active` state, "unknown" when it cannot be queried
    fn active_state(&self, name: &str) -> String;

    /// Check if a unit file exists for the service
    fn is_installed(&self, name: &str) -> bool {
        self.unit_file_path(name).exists()
    }

    /// Get the path to the unit file for the service
    fn unit_file_path(&self, name: &str) -> PathBuf;

    /// Directory holding unit files
    fn unit_dir(&self) -> &Path;
}

/// Locate a required tool on PATH
pub fn require_tool(tool: &str) -> Result<PathBuf, ServiceError> {
    which::which(tool).map_err(|_| ServiceError::ToolingMissing(tool.to_string()))
}

/// Get the service manager for this host
///
/// Fails when `systemctl` is not on PATH.
pub fn get_service_manager(config: &Config) -> Result<Box<dyn ServiceManager>, ServiceError> {
    require_tool(SYSTEMCTL)?;
    if !systemd::systemd_available() {
        tracing::warn!("/run/systemd/system is missing; systemd may not be the running init");
    }
    Ok(Box::new(SystemdManager::new(&config.unit_dir)))
}
