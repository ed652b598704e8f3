//! Uninstall command implementation
//!
//! Stops, disables and removes a service's unit file. Idempotent: removing a
//! service that isn't installed exits 0.

use crate::output::CommandSpinner;
use anyhow::Result;
use clap::Args;
use console::style;
use servicify_core::Config;
use servicify_core::descriptor::validate_service_name;

use super::privileged_manager;

/// Arguments for the uninstall command
#[derive(Args)]
pub struct UninstallArgs {
    /// Service name
    pub name: String,
}

/// Remove the service from systemd
///
/// This command:
/// 1. Stops and disables the unit (ignoring "not loaded" failures)
/// 2. Deletes the unit file if present
/// 3. Reloads systemd
pub fn cmd_uninstall(args: &UninstallArgs, config: &Config, quiet: bool) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    let manager = privileged_manager(config, "uninstall")?;

    let spinner = CommandSpinner::new_maybe(&format!("Removing {name}..."), quiet);
    let result = match manager.uninstall(&name) {
        Ok(result) => result,
        Err(e) => {
            spinner.fail("Uninstall failed");
            return Err(e.into());
        }
    };

    if result.removed {
        spinner.success(&format!("Service {name} removed"));
        if !quiet {
            println!();
            println!("Removed: {}", style(result.unit_file_path.display()).dim());
        }
    } else {
        spinner.success(&format!("Service {name} was not installed"));
        if !quiet {
            println!(
                "{}",
                style(format!("No unit file at {}", result.unit_file_path.display())).dim()
            );
        }
    }

    Ok(())
}
