//! Service descriptor resolution
//!
//! A [`ServiceDescriptor`] is everything the unit template needs, fully
//! validated. It is built fresh for each install from CLI input plus
//! filesystem probing and is never persisted except as the rendered unit.

pub mod entry;

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ServiceError;
use crate::privilege;

pub use entry::{DetectedEntry, EntrySource, FALLBACK_ENTRIES, MANIFEST_FILE, detect_entry};

/// Unit file suffix appended to the service name
pub const UNIT_SUFFIX: &str = ".service";

/// Caller-supplied inputs for an install
///
/// Every `None` is filled in by [`ServiceDescriptor::resolve`].
#[derive(Debug, Clone, Default)]
pub struct DescriptorRequest {
    pub name: String,
    pub app_dir: PathBuf,
    pub entry: Option<PathBuf>,
    pub interpreter: Option<PathBuf>,
    pub user: Option<String>,
    pub env_file: Option<PathBuf>,
    pub description: Option<String>,
}

/// A fully resolved service, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// systemd unit name without the `.service` suffix
    pub name: String,
    pub description: String,
    /// Absolute application directory, also the working directory
    pub app_dir: PathBuf,
    /// Entry file relative to `app_dir`
    pub entry: PathBuf,
    /// Absolute path to an executable interpreter
    pub interpreter: PathBuf,
    pub user: String,
    /// Optional environment file; may not exist
    pub env_file: PathBuf,
    /// How `entry` was chosen, `None` when given explicitly
    pub entry_source: Option<EntrySource>,
}

impl ServiceDescriptor {
    /// Resolve and validate every field of a descriptor
    ///
    /// Order: name, app dir, interpreter, entry, user, env file. The first
    /// failure aborts; nothing is written here.
    pub fn resolve(request: &DescriptorRequest, config: &Config) -> Result<Self, ServiceError> {
        let name = validate_service_name(&request.name)?;
        let app_dir = resolve_app_dir(&request.app_dir)?;
        let interpreter = resolve_interpreter(request.interpreter.as_deref(), &config.interpreter)?;

        let (entry, entry_source) = match &request.entry {
            Some(explicit) => (relative_to(&app_dir, explicit), None),
            None => {
                let command = interpreter
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(&config.interpreter);
                let detected = detect_entry(&app_dir, command)?;
                (detected.path, Some(detected.source))
            }
        };
        let entry_path = app_dir.join(&entry);
        if !entry_path.is_file() {
            return Err(ServiceError::EntryNotFound(entry_path));
        }

        let user = match request.user.as_deref().map(str::trim) {
            Some(user) if !user.is_empty() => user.to_string(),
            Some(_) => return Err(ServiceError::Unresolved("run-as user")),
            None => privilege::invoking_user(),
        };

        let env_file = match &request.env_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => app_dir.join(path),
            None => app_dir.join(&config.env_file),
        };

        let description = request
            .description
            .as_deref()
            .map(|d| d.lines().next().unwrap_or("").trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("{name} service"));

        tracing::debug!(
            name = %name,
            app_dir = %app_dir.display(),
            entry = %entry.display(),
            interpreter = %interpreter.display(),
            user = %user,
            "resolved service descriptor"
        );

        Ok(Self {
            name,
            description,
            app_dir,
            entry,
            interpreter,
            user,
            env_file,
            entry_source,
        })
    }

    /// Absolute path of the entry file
    pub fn entry_path(&self) -> PathBuf {
        self.app_dir.join(&self.entry)
    }

    /// File name of the unit, e.g. `web.service`
    pub fn unit_file_name(&self) -> String {
        unit_file_name(&self.name)
    }
}

/// File name of the unit for a service name
pub fn unit_file_name(name: &str) -> String {
    format!("{name}{UNIT_SUFFIX}")
}

/// Check a service name is usable as a systemd unit name
///
/// A trailing `.service` is accepted and stripped.
pub fn validate_service_name(raw: &str) -> Result<String, ServiceError> {
    let trimmed = raw.trim();
    let name = trimmed.strip_suffix(UNIT_SUFFIX).unwrap_or(trimmed);

    let valid = !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | ':'));

    if valid {
        Ok(name.to_string())
    } else {
        Err(ServiceError::InvalidName(raw.to_string()))
    }
}

fn resolve_app_dir(raw: &Path) -> Result<PathBuf, ServiceError> {
    let dir = if raw.as_os_str().is_empty() {
        Path::new(".")
    } else {
        raw
    };
    match dir.canonicalize() {
        Ok(path) if path.is_dir() => Ok(path),
        _ => Err(ServiceError::AppDirNotFound(raw.to_path_buf())),
    }
}

/// Use the explicit interpreter or look the configured one up on PATH
fn resolve_interpreter(explicit: Option<&Path>, configured: &str) -> Result<PathBuf, ServiceError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ServiceError::InterpreterNotFound(path.display().to_string()));
            }
            std::path::absolute(path)
                .map_err(|e| ServiceError::io("Failed to resolve interpreter", path, e))?
        }
        None => which::which(configured)
            .map_err(|_| ServiceError::InterpreterNotFound(configured.to_string()))?,
    };

    if is_executable_file(&path) {
        Ok(path)
    } else {
        Err(ServiceError::InterpreterNotExecutable(path))
    }
}

fn is_executable_file(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Express an explicit entry relative to the app dir when it lives inside it
fn relative_to(app_dir: &Path, entry: &Path) -> PathBuf {
    if entry.is_absolute() {
        let canonical = entry.canonicalize().unwrap_or_else(|_| entry.to_path_buf());
        canonical
            .strip_prefix(app_dir)
            .map(Path::to_path_buf)
            .unwrap_or(canonical)
    } else {
        entry
            .strip_prefix("./")
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.to_path_buf())
    }
}
