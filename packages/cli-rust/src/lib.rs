//! servicify CLI - Run any Node.js app as a systemd service
//!
//! This module contains the command dispatcher used by the binary.

mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use servicify_core::{Config, config, get_version_long, load_config};
use tracing_subscriber::EnvFilter;

/// Run any Node.js app as a systemd service
#[derive(Parser)]
#[command(name = "servicify")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run any Node.js app as a systemd service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase verbosity level
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy servicify to the system path
    Setup(commands::SetupArgs),
    /// Register an app as a systemd service and start it
    Install(commands::InstallArgs),
    /// Stop and remove a service
    Uninstall(commands::UninstallArgs),
    /// Start a service
    Start(commands::StartArgs),
    /// Stop a service
    Stop(commands::StopArgs),
    /// Restart a service
    Restart(commands::RestartArgs),
    /// Show systemd's status for a service
    Status(commands::StatusArgs),
    /// Follow a service's journal
    Logs(commands::LogsArgs),
    /// List services installed by servicify
    List(commands::ListArgs),
}

/// Parse arguments, run the command, and map the outcome to an exit code
///
/// Usage errors exit 1; delegated systemctl failures keep systemctl's code.
pub fn run_cli() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::show_error(&err);
            ExitCode::from(output::exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    // Configure color output
    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let config = load_config_or_exit();

    match cli.command {
        Some(Commands::Setup(args)) => commands::cmd_setup(&args, &config, cli.quiet),
        Some(Commands::Install(args)) => commands::cmd_install(&args, &config, cli.quiet),
        Some(Commands::Uninstall(args)) => commands::cmd_uninstall(&args, &config, cli.quiet),
        Some(Commands::Start(args)) => commands::cmd_start(&args, &config, cli.quiet),
        Some(Commands::Stop(args)) => commands::cmd_stop(&args, &config, cli.quiet),
        Some(Commands::Restart(args)) => commands::cmd_restart(&args, &config, cli.quiet),
        Some(Commands::Status(args)) => commands::cmd_status(&args, &config),
        Some(Commands::Logs(args)) => commands::cmd_logs(&args, &config, cli.quiet),
        Some(Commands::List(args)) => commands::cmd_list(&args, &config, cli.quiet),
        None => {
            // No command - show a welcome message and hint to use --help
            if !cli.quiet {
                println!(
                    "{} {}",
                    style("servicify").cyan().bold(),
                    style(get_version_long()).dim()
                );
                println!();
                println!("Run {} for available commands.", style("--help").green());
            }
            Ok(())
        }
    }
}

/// Log to stderr; RUST_LOG wins over -v
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config_or_exit() -> Config {
    let config_path = config::get_config_path();

    match load_config() {
        Ok(config) => {
            if let Some(path) = &config_path {
                if path.exists() {
                    tracing::info!("Config: {}", path.display());
                } else {
                    tracing::info!("Config: {} (not present, using defaults)", path.display());
                }
            }
            config
        }
        Err(e) => {
            // Display rich error for invalid config
            eprintln!("{} Configuration error", style("Error:").red().bold());
            eprintln!();
            eprintln!("  {e:#}");
            if let Some(path) = config_path {
                eprintln!();
                eprintln!("  Config file: {}", style(path.display()).yellow());
            }
            eprintln!();
            eprintln!(
                "  {} Check the config file for syntax errors or unknown fields.",
                style("Tip:").cyan()
            );
            std::process::exit(1);
        }
    }
}
