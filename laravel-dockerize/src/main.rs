//! dockerize CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use laravel_dockerize::commands::{InstallCommand, ScaffoldArgs, UpdateCommand};
use laravel_dockerize::observability;

#[derive(Parser)]
#[command(name = "dockerize")]
#[command(version)]
#[command(about = "Docker scaffolding for Laravel (local/dev/prod)", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install Docker scaffolding (compose files, Dockerfiles, env example)
    Install(ScaffoldArgs),
    /// Update Docker scaffolding from the templates; detects the database when --db is omitted
    Update(ScaffoldArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    match cli.command {
        Commands::Install(args) => InstallCommand::new(args).execute()?,
        Commands::Update(args) => UpdateCommand::new(args).execute()?,
    }

    Ok(())
}
