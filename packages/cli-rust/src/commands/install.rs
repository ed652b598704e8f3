//! Install command implementation
//!
//! Resolves a service descriptor for an app directory, writes the systemd
//! unit, and enables and starts it. `--dry-run` prints the unit instead.

use std::path::PathBuf;

use crate::output::{CommandSpinner, state_style};
use anyhow::Result;
use clap::Args;
use console::style;
use servicify_core::Config;
use servicify_core::descriptor::{DescriptorRequest, ServiceDescriptor};
use servicify_core::platform::render_unit_file;

use super::privileged_manager;

/// Arguments for the install command
#[derive(Args)]
pub struct InstallArgs {
    /// Service name, used as the systemd unit name
    pub name: String,

    /// Application directory
    #[arg(default_value = ".")]
    pub app_dir: PathBuf,

    /// Entry file relative to the app directory (skips auto-detection)
    #[arg(long)]
    pub entry: Option<PathBuf>,

    /// Interpreter binary (default: `node` found on PATH)
    #[arg(long, visible_alias = "node")]
    pub interpreter: Option<PathBuf>,

    /// User the service runs as (default: the invoking user)
    #[arg(long)]
    pub user: Option<String>,

    /// Environment file, loaded only if present (default: <app_dir>/.env)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Description shown by systemctl (default: "<name> service")
    #[arg(long)]
    pub description: Option<String>,

    /// Print the unit file instead of installing it
    #[arg(long)]
    pub dry_run: bool,
}

impl InstallArgs {
    fn to_request(&self) -> DescriptorRequest {
        DescriptorRequest {
            name: self.name.clone(),
            app_dir: self.app_dir.clone(),
            entry: self.entry.clone(),
            interpreter: self.interpreter.clone(),
            user: self.user.clone(),
            env_file: self.env_file.clone(),
            description: self.description.clone(),
        }
    }
}

/// Register the app as a systemd service
///
/// This command:
/// 1. Checks for root and systemctl (skipped for --dry-run)
/// 2. Resolves name, app dir, interpreter, entry point, user, env file
/// 3. Writes the unit, reloads systemd, enables and starts the service
pub fn cmd_install(args: &InstallArgs, config: &Config, quiet: bool) -> Result<()> {
    if args.dry_run {
        let descriptor = resolve_descriptor(args, config)?;
        print!("{}", render_unit_file(&descriptor));
        return Ok(());
    }

    // Preconditions before touching anything
    let manager = privileged_manager(config, "install")?;
    let descriptor = resolve_descriptor(args, config)?;

    let spinner = CommandSpinner::new_maybe(&format!("Installing {}...", descriptor.name), quiet);
    let result = match manager.install(&descriptor) {
        Ok(result) => {
            spinner.success(&format!("Service {} installed", descriptor.name));
            result
        }
        Err(e) => {
            spinner.fail("Install failed");
            return Err(e.into());
        }
    };

    if !quiet {
        println!();
        println!(
            "Unit file:    {}",
            style(result.unit_file_path.display()).dim()
        );
        if result.replaced {
            println!("              {}", style("(replaced existing unit)").dim());
        }
        println!("Service name: {}", result.service_name);
        println!("Entry:        {}", descriptor.entry_path().display());
        println!("Run as:       {}", descriptor.user);
        println!("Status:       {}", state_style(&result.active_state));
        println!();
        println!(
            "Follow logs with {}",
            style(format!("servicify logs {}", result.service_name)).cyan()
        );
    }

    Ok(())
}

fn resolve_descriptor(args: &InstallArgs, config: &Config) -> Result<ServiceDescriptor> {
    let descriptor = ServiceDescriptor::resolve(&args.to_request(), config)?;

    if let Some(source) = descriptor.entry_source {
        tracing::info!("Entry point {} (from {})", descriptor.entry.display(), source);
    }
    tracing::info!("Interpreter {}", descriptor.interpreter.display());

    Ok(descriptor)
}
