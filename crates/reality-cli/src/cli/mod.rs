//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init_once(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load()?;

    // Flag or env first, then the config file
    let output_format = cli.output.or(config.output_format).unwrap_or_default();

    // Create context for commands
    let ctx = commands::Context {
        output_format,
        explain: cli.explain || config.explain_by_default,
        verbose: cli.verbose,
        no_color: cli.no_color,
        config,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(ctx, args).await,
        Commands::Keypair(args) => commands::keypair::execute(ctx, args).await,
        Commands::Inspect(args) => commands::inspect::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}
