//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{id, schedule};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "newstrack")]
#[command(author, version, about = "Tracking IDs and publish status for news articles")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate, check and share article tracking IDs
    #[command(subcommand)]
    Id(id::IdCommands),

    /// Inspect publish status and schedule dates
    #[command(subcommand)]
    Schedule(schedule::ScheduleCommands),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("newstrack starting");

    let config = Config::load()?;
    match &config.project_root {
        Some(root) => {
            output.verbose_ctx("config", &format!("Project config at: {}", root.display()))
        }
        None => output.verbose_ctx("config", "No project config found, using defaults"),
    }

    match cli.command {
        Commands::Id(cmd) => id::run(cmd, &config, &output)?,
        Commands::Schedule(cmd) => schedule::run(cmd, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
