//! Status command implementation
//!
//! Hands the terminal to `systemctl status`. The exit code is always 0:
//! status is informational, not a health check.

use anyhow::Result;
use clap::Args;
use console::style;
use servicify_core::descriptor::validate_service_name;
use servicify_core::{Config, get_service_manager};

/// Arguments for the status command
#[derive(Args)]
pub struct StatusArgs {
    /// Service name
    pub name: String,
}

/// Show systemd's view of the service
pub fn cmd_status(args: &StatusArgs, config: &Config) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    let manager = get_service_manager(config)?;
    if !manager.is_installed(&name) {
        eprintln!(
            "{}",
            style(format!(
                "No unit file at {}",
                manager.unit_file_path(&name).display()
            ))
            .dim()
        );
    }
    manager.status(&name)?;
    Ok(())
}
