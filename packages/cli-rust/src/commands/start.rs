//! Start command implementation

use crate::output::{CommandSpinner, state_style};
use anyhow::Result;
use clap::Args;
use servicify_core::Config;
use servicify_core::descriptor::validate_service_name;

use super::privileged_manager;

/// Arguments for the start command
#[derive(Args)]
pub struct StartArgs {
    /// Service name
    pub name: String,
}

/// Start an installed service via systemctl
pub fn cmd_start(args: &StartArgs, config: &Config, quiet: bool) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    let manager = privileged_manager(config, "start")?;

    let spinner = CommandSpinner::new_maybe(&format!("Starting {name}..."), quiet);
    if let Err(e) = manager.start(&name) {
        spinner.fail(&format!("Failed to start {name}"));
        return Err(e.into());
    }

    let state = manager.active_state(&name);
    spinner.success(&format!("{name} {}", state_style(&state)));
    Ok(())
}
