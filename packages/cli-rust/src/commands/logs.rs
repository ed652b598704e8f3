//! Logs command implementation
//!
//! Follows the service's journal until Ctrl+C. The interrupt goes straight
//! to journalctl, which exits; servicify then exits with it.

use anyhow::Result;
use clap::Args;
use console::style;
use servicify_core::descriptor::validate_service_name;
use servicify_core::platform::{JOURNALCTL, ServiceManager, SystemdManager, require_tool};
use servicify_core::Config;

/// Arguments for the logs command
#[derive(Args)]
pub struct LogsArgs {
    /// Service name
    pub name: String,

    /// Number of past lines to show before following (default: 50)
    #[arg(short = 'n', long = "lines")]
    pub lines: Option<u32>,
}

/// Stream logs for the service from the journal
pub fn cmd_logs(args: &LogsArgs, config: &Config, quiet: bool) -> Result<()> {
    let name = validate_service_name(&args.name)?;
    require_tool(JOURNALCTL)?;

    if !quiet {
        eprintln!("{}", style("Following logs (Ctrl+C to exit)...").dim());
        eprintln!();
    }

    let manager = SystemdManager::new(&config.unit_dir);
    manager.follow_logs(&name, args.lines.unwrap_or(config.log_lines))?;
    Ok(())
}
