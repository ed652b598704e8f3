//! Service registration error types
//!
//! Errors that can occur while resolving a service descriptor or driving
//! systemd through its command-line tools.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during service operations
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The operation needs root and the caller is not root
    #[error("'{0}' requires root privileges")]
    NotElevated(String),

    /// A required systemd tool is not on PATH
    #[error("{0} not found on PATH. Is systemd installed and running?")]
    ToolingMissing(String),

    /// Service name is empty or contains characters systemd rejects
    #[error("Invalid service name '{0}': use letters, digits, '-', '_', '.', '@' or ':'")]
    InvalidName(String),

    /// Application directory missing or not a directory
    #[error("Application directory not found: {}", .0.display())]
    AppDirNotFound(PathBuf),

    /// Interpreter could not be located on PATH
    #[error("Interpreter '{0}' not found on PATH")]
    InterpreterNotFound(String),

    /// Interpreter path exists but cannot be executed
    #[error("Interpreter is not an executable file: {}", .0.display())]
    InterpreterNotExecutable(PathBuf),

    /// Entry file does not exist under the application directory
    #[error("Entry file not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// No manifest field or conventional file named an entry point
    #[error("Could not detect an entry point in {}", .0.display())]
    EntryUndetected(PathBuf),

    /// A descriptor field resolved to an empty value
    #[error("Could not determine {0} for the service")]
    Unresolved(&'static str),

    /// A systemctl/journalctl invocation exited non-zero
    #[error("{command} failed: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Failed to spawn a command at all
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem operation on a specific path failed
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    /// Process exit code this error should map to
    ///
    /// Delegated failures keep the manager's own code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ServiceError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_keeps_manager_exit_code() {
        let err = ServiceError::CommandFailed {
            command: "systemctl start web".to_string(),
            code: Some(5),
            stderr: "Unit web.service not found.".to_string(),
        };
        assert_eq!(err.exit_code(), 5);
        assert_eq!(
            err.to_string(),
            "systemctl start web failed: Unit web.service not found."
        );
    }

    #[test]
    fn command_failed_without_code_maps_to_one() {
        let err = ServiceError::CommandFailed {
            command: "systemctl start web".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn precondition_errors_map_to_one() {
        assert_eq!(ServiceError::NotElevated("install".into()).exit_code(), 1);
        assert_eq!(
            ServiceError::ToolingMissing("systemctl".into()).exit_code(),
            1
        );
        assert_eq!(
            ServiceError::EntryUndetected(PathBuf::from("/srv/app")).exit_code(),
            1
        );
    }

    #[test]
    fn io_error_names_path() {
        let err = ServiceError::io(
            "Failed to write unit file",
            "/etc/systemd/system/web.service",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "Failed to write unit file /etc/systemd/system/web.service: denied"
        );
    }
}
