//! External command execution
//!
//! Every systemctl/journalctl call goes through a [`CommandRunner`] so the
//! service manager can be driven by a recording fake in tests.

use std::process::{Command, Stdio};

use crate::error::ServiceError;

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs on behalf of the service manager
pub trait CommandRunner: Send + Sync {
    /// Run to completion, capturing stdout and stderr
    fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ServiceError>;

    /// Run with the terminal attached, returning the exit code
    ///
    /// Blocks until the child exits; an interrupt from the terminal reaches
    /// the child directly.
    fn attach(&self, program: &str, args: &[&str]) -> Result<Option<i32>, ServiceError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn capture(&self, program: &str, args: &[&str]) -> Result<CommandOutput, ServiceError> {
        tracing::debug!(program, ?args, "running");
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ServiceError::Spawn {
                command: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn attach(&self, program: &str, args: &[&str]) -> Result<Option<i32>, ServiceError> {
        tracing::debug!(program, ?args, "running attached");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|source| ServiceError::Spawn {
                command: program.to_string(),
                source,
            })?;
        Ok(status.code())
    }
}

/// Render a command line for messages, e.g. `systemctl start web`
pub fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}
