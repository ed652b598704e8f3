//! systemd service manager for Linux
//!
//! This module provides SystemdManager which implements the ServiceManager
//! trait by writing system units and shelling out to systemctl/journalctl.

use std::fs;
use std::path::{Path, PathBuf};

use super::command::{CommandOutput, CommandRunner, SystemCommandRunner, display_command};
use super::{
    InstallResult, JOURNALCTL, ManagedService, SYSTEMCTL, ServiceManager, UninstallResult,
};
use crate::descriptor::{ServiceDescriptor, UNIT_SUFFIX, unit_file_name};
use crate::error::ServiceError;

/// First line of every unit servicify writes; `list` keys off it
pub const MANAGED_MARKER: &str = "# Managed by servicify";

/// Render the systemd unit for a descriptor
///
/// Pure: the same descriptor always renders the same bytes.
pub fn render_unit_file(descriptor: &ServiceDescriptor) -> String {
    let exec_start = format!(
        "{} {}",
        exec_arg(&descriptor.interpreter),
        exec_arg(&descriptor.entry_path())
    );

    format!(
        r#"{marker}
[Unit]
Description={description}
After=network.target

[Service]
Type=simple
User={user}
WorkingDirectory={working_dir}
EnvironmentFile=-{env_file}
ExecStart={exec_start}
Restart=on-failure
RestartSec=5
StandardOutput=journal
StandardError=journal
SyslogIdentifier={name}

[Install]
WantedBy=multi-user.target
"#,
        marker = MANAGED_MARKER,
        description = escape_specifiers(&descriptor.description),
        user = escape_specifiers(&descriptor.user),
        working_dir = escape_specifiers(&descriptor.app_dir.display().to_string()),
        env_file = escape_specifiers(&descriptor.env_file.display().to_string()),
        exec_start = exec_start,
        name = descriptor.name,
    )
}

// systemd expands `%` specifiers in every value
fn escape_specifiers(value: &str) -> String {
    value.replace('%', "%%")
}

// One ExecStart word: escape specifiers, variables and quotes, then quote
// if the word would otherwise split or unescape
fn exec_arg(path: &Path) -> String {
    let raw = path.display().to_string();
    let escaped = escape_specifiers(&raw)
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "$$");
    if raw.contains(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '\\')) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Check if systemd is available on this system
///
/// Returns true if /run/systemd/system exists, indicating systemd is running
/// as the init system.
pub fn systemd_available() -> bool {
    Path::new("/run/systemd/system").exists()
}

/// SystemdManager handles service registration with systemd on Linux
pub struct SystemdManager {
    unit_dir: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl SystemdManager {
    /// Manager writing units to `unit_dir` and running the real systemctl
    pub fn new(unit_dir: &Path) -> Self {
        Self::with_runner(unit_dir, Box::new(SystemCommandRunner))
    }

    pub fn with_runner(unit_dir: &Path, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            unit_dir: unit_dir.to_path_buf(),
            runner,
        }
    }

    /// Run systemctl, capturing output
    fn systemctl(&self, args: &[&str]) -> Result<CommandOutput, ServiceError> {
        self.runner.capture(SYSTEMCTL, args)
    }

    /// Run systemctl and check for success
    ///
    /// systemctl's stderr is carried verbatim in the error.
    fn systemctl_ok(&self, args: &[&str]) -> Result<(), ServiceError> {
        let output = self.systemctl(args)?;
        if output.success() {
            Ok(())
        } else {
            Err(ServiceError::CommandFailed {
                command: display_command(SYSTEMCTL, args),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }

    /// Run systemctl for cleanup where failure is expected and harmless
    fn systemctl_quiet(&self, args: &[&str]) {
        match self.systemctl(args) {
            Ok(output) if !output.success() => tracing::debug!(
                "{} exited {:?}: {}",
                display_command(SYSTEMCTL, args),
                output.code,
                output.stderr.trim()
            ),
            Err(e) => tracing::debug!("{e}"),
            Ok(_) => {}
        }
    }

    /// First line of a systemctl query, or "unknown"
    fn query(&self, verb: &str, unit: &str) -> String {
        self.systemctl(&[verb, unit])
            .ok()
            .and_then(|output| output.stdout.lines().next().map(|l| l.trim().to_string()))
            .filter(|state| !state.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn is_managed_unit(path: &Path) -> bool {
        fs::read_to_string(path)
            .map(|contents| contents.lines().any(|line| line.trim_end() == MANAGED_MARKER))
            .unwrap_or(false)
    }
}

impl ServiceManager for SystemdManager {
    fn install(&self, descriptor: &ServiceDescriptor) -> Result<InstallResult, ServiceError> {
        // 1. Create unit directory if needed
        fs::create_dir_all(&self.unit_dir).map_err(|e| {
            ServiceError::io("Failed to create unit directory", &self.unit_dir, e)
        })?;

        // 2. Render and write unit file
        let unit_content = render_unit_file(descriptor);
        let unit_file = self.unit_file_path(&descriptor.name);
        let replaced = unit_file.exists();

        fs::write(&unit_file, &unit_content)
            .map_err(|e| ServiceError::io("Failed to write unit file", &unit_file, e))?;
        tracing::info!(
            replaced,
            "Wrote unit file {}",
            unit_file.display()
        );

        // 3. Reload so systemd sees the new unit before enable/start
        let unit = descriptor.unit_file_name();
        self.systemctl_ok(&["daemon-reload"])?;

        // 4. Enable for boot, then start now
        self.systemctl_ok(&["enable", &unit])?;
        self.systemctl_ok(&["start", &unit])?;

        Ok(InstallResult {
            unit_file_path: unit_file,
            service_name: descriptor.name.clone(),
            replaced,
            active_state: self.active_state(&descriptor.name),
        })
    }

    fn uninstall(&self, name: &str) -> Result<UninstallResult, ServiceError> {
        let unit = unit_file_name(name);

        // 1. Stop and disable (errors just mean it wasn't running/enabled)
        self.systemctl_quiet(&["stop", &unit]);
        self.systemctl_quiet(&["disable", &unit]);

        // 2. Remove the unit file
        let unit_file = self.unit_file_path(name);
        let removed = if unit_file.exists() {
            fs::remove_file(&unit_file)
                .map_err(|e| ServiceError::io("Failed to remove unit file", &unit_file, e))?;
            tracing::info!("Removed unit file {}", unit_file.display());
            true
        } else {
            false
        };

        // 3. Reload daemon to reflect the removal
        self.systemctl_ok(&["daemon-reload"])?;

        Ok(UninstallResult {
            unit_file_path: unit_file,
            removed,
        })
    }

    fn start(&self, name: &str) -> Result<(), ServiceError> {
        self.systemctl_ok(&["start", &unit_file_name(name)])
    }

    fn stop(&self, name: &str) -> Result<(), ServiceError> {
        self.systemctl_ok(&["stop", &unit_file_name(name)])
    }

    fn restart(&self, name: &str) -> Result<(), ServiceError> {
        self.systemctl_ok(&["restart", &unit_file_name(name)])
    }

    fn status(&self, name: &str) -> Result<(), ServiceError> {
        let code = self
            .runner
            .attach(SYSTEMCTL, &["status", &unit_file_name(name), "--no-pager"])?;
        tracing::debug!(?code, "systemctl status finished");
        Ok(())
    }

    fn follow_logs(&self, name: &str, lines: u32) -> Result<(), ServiceError> {
        let lines = lines.to_string();
        let code = self
            .runner
            .attach(JOURNALCTL, &["-u", &unit_file_name(name), "-f", "-n", &lines])?;
        tracing::debug!(?code, "journalctl finished");
        Ok(())
    }

    fn list(&self) -> Result<Vec<ManagedService>, ServiceError> {
        let entries = match fs::read_dir(&self.unit_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ServiceError::io(
                    "Failed to read unit directory",
                    &self.unit_dir,
                    e,
                ));
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && Self::is_managed_unit(path))
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .and_then(|n| n.strip_suffix(UNIT_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| {
                let unit = unit_file_name(&name);
                ManagedService {
                    unit_file_path: self.unit_file_path(&name),
                    active_state: self.query("is-active", &unit),
                    enabled_state: self.query("is-enabled", &unit),
                    name,
                }
            })
            .collect())
    }

    fn active_state(&self, name: &str) -> String {
        self.query("is-active", &unit_file_name(name))
    }

    fn unit_file_path(&self, name: &str) -> PathBuf {
        self.unit_dir.join(unit_file_name(name))
    }

    fn unit_dir(&self) -> &Path {
        &self.unit_dir
    }
}
