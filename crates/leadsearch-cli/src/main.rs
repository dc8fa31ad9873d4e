//! Leadsearch CLI
//!
//! Keyword search for CRM customer listings.

use anyhow::Result;
use clap::Parser;
use leadsearch_core::error::exit_codes;
use leadsearch_core::{Config, KeywordResolver, LeadSearchError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<LeadSearchError>()
            .map(LeadSearchError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let resolver = if cli.offline {
        KeywordResolver::offline()
    } else {
        KeywordResolver::from_config(&config)
    };

    match cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &resolver, cli.format).await,
        Commands::Filter(args) => commands::resolve::run_filter(args, &resolver).await,
        Commands::Search(args) => {
            commands::search::run(args, &resolver, &config, cli.format).await
        }
        Commands::Prompt => commands::info::run_prompt(),
        Commands::Fields => commands::info::run_fields(cli.format),
    }
}
