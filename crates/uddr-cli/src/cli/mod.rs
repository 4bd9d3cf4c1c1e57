//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use uddr::Endpoints;

use crate::config::Config;
use crate::log::init_logger;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Load configuration
    let config = Config::load()?;

    // Flags and environment first, then the config file
    let output_format = cli.output.or(config.output_format).unwrap_or_default();
    let api_key = cli.api_key.or_else(|| config.api_key.clone());
    let client_id = cli.client_id.or_else(|| config.client_id.clone());
    let organization = cli.org.or_else(|| config.organization.clone());

    let mut endpoints = Endpoints::default();
    if let Some(url) = cli.api_url {
        endpoints = endpoints.api(url);
    }
    if let Some(url) = cli.private_api_url {
        endpoints = endpoints.private_api(url);
    }
    if let Some(url) = cli.doh_url {
        endpoints = endpoints.doh(url);
    }

    // Create context for commands
    let ctx = commands::Context {
        api_key,
        client_id,
        organization,
        endpoints,
        output_format,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Aggregates(args) => commands::overview::aggregates(ctx, args).await,
        Commands::Bar(args) => commands::overview::bar(ctx, args).await,
        Commands::Histogram(args) => commands::overview::histogram(ctx, args).await,
        Commands::Summary(args) => commands::overview::summary(ctx, args).await,
        Commands::Reports(args) => commands::reports::execute(ctx, args).await,
        Commands::Artifact(args) => commands::logs::artifact(ctx, args).await,
        Commands::Logs(args) => commands::logs::logs(ctx, args).await,
        Commands::Passthrough(args) => commands::logs::passthrough(ctx, args).await,
        Commands::Category(args) => commands::category::execute(ctx, args).await,
        Commands::Account(args) => commands::account::execute(ctx, args).await,
        Commands::Decision(args) => commands::decision::execute(ctx, args).await,
        Commands::Normalize(args) => commands::normalize::execute(&args),
        Commands::Lookup(args) => commands::lookup::execute(ctx, args).await,
        Commands::Config(args) => commands::config::execute(args),
    }
}
