//! sentinel-hooks: lifecycle hook system for Claude Code
//!
//! A CLI tool wired into Claude Code's hook events. It blocks dangerous shell
//! commands before they run, writes a JSONL audit trail of agent activity,
//! optionally speaks notifications, and can commit a work-in-progress
//! checkpoint when the agent stops.

mod cli;
mod config;
mod domain;
mod service;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use config::ConfigService;
use service::HookService;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let hook_mode = matches!(cli.command, Commands::Hook);

    // Load configuration. The hook path must not wedge the agent on a broken
    // config, so it degrades to exit 0; init/check report the error.
    let config = match ConfigService::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if hook_mode => {
            eprintln!("sentinel-hooks: {e:#}");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    // Initialize logging if debug mode
    if cli.debug || config.debug {
        if let Err(e) = domain::logger::init(&config) {
            if !hook_mode {
                return Err(e);
            }
            eprintln!("sentinel-hooks: {e:#}");
        }
    }

    // Execute command
    match cli.command {
        Commands::Hook => match HookService::new(config) {
            Ok(service) => {
                if let Err(e) = service.run() {
                    eprintln!("sentinel-hooks: {e:#}");
                }
            }
            Err(e) => eprintln!("sentinel-hooks: {e:#}"),
        },
        Commands::Init { path } => {
            let config_path = if let Some(p) = path {
                ConfigService::generate_at(&p)?;
                p
            } else {
                ConfigService::generate_default()?;
                ConfigService::default_path()
            };
            if !cli.quiet {
                eprintln!("Configuration file created at: {}", config_path.display());
            }
        }
        Commands::Check => {
            config::validate(&config)?;
            if !cli.quiet {
                eprintln!("Configuration is valid.");
            }
        }
        Commands::Version => {
            println!("sentinel-hooks {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
