//! List command implementation
//!
//! Shows every unit in the unit directory that servicify wrote, with its
//! live state.

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, Table};
use console::style;
use servicify_core::platform::ManagedService;
use servicify_core::{Config, get_service_manager};

/// Arguments for the list command
#[derive(Args)]
pub struct ListArgs {
    /// Show only service names (for scripting)
    #[arg(long)]
    pub names_only: bool,
}

pub fn cmd_list(args: &ListArgs, config: &Config, quiet: bool) -> Result<()> {
    let manager = get_service_manager(config)?;
    let services = manager.list()?;

    if services.is_empty() {
        if !quiet && !args.names_only {
            println!(
                "No services managed by servicify in {}.",
                manager.unit_dir().display()
            );
            println!();
            println!(
                "  {} {}",
                style("Add one with:").dim(),
                style("sudo servicify install <name> <app-dir>").yellow()
            );
        }
        return Ok(());
    }

    // Names only mode (for scripting)
    if args.names_only || quiet {
        for service in &services {
            println!("{}", service.name);
        }
        return Ok(());
    }

    println!("{}", services_table(&services));
    println!();
    println!(
        "  {} {}",
        style("Unit directory:").dim(),
        style(manager.unit_dir().display()).dim()
    );

    Ok(())
}

fn services_table(services: &[ManagedService]) -> Table {
    let mut table = Table::new();
    if !console::colors_enabled() {
        table.force_no_tty();
    }
    table.set_header(vec!["Name", "Active", "Enabled", "Unit file"]);

    for service in services {
        table.add_row(vec![
            Cell::new(&service.name),
            state_cell(&service.active_state),
            state_cell(&service.enabled_state),
            Cell::new(service.unit_file_path.display()),
        ]);
    }

    table
}

/// Color a systemd state the same way `state_style` does for plain output
fn state_cell(state: &str) -> Cell {
    let cell = Cell::new(state);
    match state {
        "active" | "enabled" => cell.fg(Color::Green),
        "failed" => cell.fg(Color::Red),
        "activating" | "deactivating" | "reloading" => cell.fg(Color::Yellow),
        _ => cell,
    }
}
