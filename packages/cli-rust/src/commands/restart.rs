//! Restart command implementation

use crate::output::{CommandSpinner, state_style};
use anyhow::Result;
use clap::Args;
use servicify_core::Config;
use servicify_core::descriptor::validate_service_name;

use super::privileged_manager;

/// Arguments for the restart command
#[derive(Args)]
pub struct RestartArgs {
    /// Service name
    pub name: String,
}

/// Restart a service via systemctl
///
/// Starts the service if it was stopped.
pub fn cmd_restart(args: &RestartArgs, config: &Config, quiet: bool) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    let manager = privileged_manager(config, "restart")?;

    let spinner = CommandSpinner::new_maybe(&format!("Restarting {name}..."), quiet);
    if let Err(e) = manager.restart(&name) {
        spinner.fail(&format!("Failed to restart {name}"));
        return Err(e.into());
    }

    let state = manager.active_state(&name);
    spinner.success(&format!("{name} {}", state_style(&state)));
    Ok(())
}
