//! Error formatting
//!
//! Turns errors from `servicify-core` into a one-line message plus an
//! actionable tip, and decides the process exit code.

use console::style;
use servicify_core::ServiceError;
use servicify_core::descriptor::FALLBACK_ENTRIES;

/// Tip to print under an error, if there is a useful one
pub fn error_tip(err: &ServiceError) -> Option<String> {
    match err {
        ServiceError::NotElevated(action) => Some(format!(
            "Run with sudo: {}",
            style(format!("sudo servicify {action} ...")).cyan()
        )),
        ServiceError::ToolingMissing(tool) => Some(format!(
            "servicify drives systemd. Check that {} works on this host.",
            style(format!("{tool} --version")).cyan()
        )),
        ServiceError::InterpreterNotFound(_) | ServiceError::InterpreterNotExecutable(_) => {
            Some(format!(
                "Install Node.js or point at a binary: {}",
                style("--interpreter /path/to/node").cyan()
            ))
        }
        ServiceError::EntryUndetected(_) => Some(format!(
            "No package.json main/start script and none of {} exist.\n       Pass the entry file explicitly: {}",
            FALLBACK_ENTRIES.join(", "),
            style("--entry <file>").cyan()
        )),
        ServiceError::EntryNotFound(_) => Some(format!(
            "Check package.json or pass the entry file explicitly: {}",
            style("--entry <file>").cyan()
        )),
        ServiceError::Unresolved("run-as user") => Some(format!(
            "Pass the account to run as: {}",
            style("--user <name>").cyan()
        )),
        _ => None,
    }
}

/// Print an error to stderr in the CLI's house style
pub fn show_error(err: &anyhow::Error) {
    eprintln!("{} {err:#}", style("Error:").red().bold());
    if let Some(tip) = err.downcast_ref::<ServiceError>().and_then(error_tip) {
        eprintln!();
        eprintln!("  {} {tip}", style("Tip:").cyan());
    }
}

/// Exit code for a failed command
///
/// systemctl's own code is passed through; everything else is 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ServiceError>()
        .map(ServiceError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
