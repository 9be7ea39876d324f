// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use binaries_tools::config::AggregateConfig;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            org,
            repos,
            output_dir,
        } => {
            let mut config = AggregateConfig {
                org,
                output_dir,
                ..AggregateConfig::default()
            };
            if !repos.is_empty() {
                config.repos = repos;
            }
            commands::cmd_aggregate(&config)
        }
        Commands::UpdateManifest {
            repo_path,
            updates,
            distribution,
        } => commands::cmd_update_manifest(&repo_path, &updates, &distribution),
    }
}
