//! Stop command implementation
//!
//! Stopping an already stopped service succeeds; systemctl treats it as a
//! no-op.

use crate::output::CommandSpinner;
use anyhow::Result;
use clap::Args;
use servicify_core::Config;
use servicify_core::descriptor::validate_service_name;

use super::privileged_manager;

/// Arguments for the stop command
#[derive(Args)]
pub struct StopArgs {
    /// Service name
    pub name: String,
}

/// Stop a service via systemctl
pub fn cmd_stop(args: &StopArgs, config: &Config, quiet: bool) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    let manager = privileged_manager(config, "stop")?;

    let spinner = CommandSpinner::new_maybe(&format!("Stopping {name}..."), quiet);
    match manager.stop(&name) {
        Ok(()) => {
            spinner.success(&format!("Service {name} stopped"));
            Ok(())
        }
        Err(e) => {
            spinner.fail(&format!("Failed to stop {name}"));
            Err(e.into())
        }
    }
}
