//! Setup command implementation
//!
//! Copies the running servicify binary to the configured install path so
//! it can be invoked as `sudo servicify` from anywhere.

use std::io::IsTerminal;

use anyhow::{Context, Result, bail};
use clap::Args;
use console::style;
use dialoguer::Confirm;
use servicify_core::Config;
use servicify_core::privilege::require_elevated;
use servicify_core::setup::{SetupOutcome, install_executable};

/// Arguments for the setup command
#[derive(Args)]
pub struct SetupArgs {
    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Install servicify itself
///
/// Declining the prompt is not an error.
pub fn cmd_setup(args: &SetupArgs, config: &Config, quiet: bool) -> Result<()> {
    require_elevated("setup")?;

    let source = std::env::current_exe().context("Could not locate the running executable")?;
    let dest = &config.install_path;

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            bail!(
                "No TTY detected for the confirmation prompt.\n\n\
                Re-run non-interactively with:\n  \
                sudo servicify setup --yes"
            );
        }

        let confirm = Confirm::new()
            .with_prompt(format!("Install servicify to {}?", dest.display()))
            .default(true)
            .interact()?;

        if !confirm {
            if !quiet {
                println!("Aborted.");
            }
            return Ok(());
        }
    }

    match install_executable(&source, dest)? {
        SetupOutcome::Installed(path) => {
            if !quiet {
                println!(
                    "{} Installed to {}",
                    style("Success:").green().bold(),
                    style(path.display()).cyan()
                );
            }
        }
        SetupOutcome::AlreadyInstalled(path) => {
            if !quiet {
                println!(
                    "{}",
                    style(format!("Already running from {}", path.display())).dim()
                );
            }
        }
    }

    Ok(())
}
