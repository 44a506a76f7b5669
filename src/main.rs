mod analysis;
mod cli;
mod config;
mod models;
mod source;
mod tracker;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // --user wins over the configured account
    let identity = cli
        .user
        .clone()
        .unwrap_or_else(|| config.source.identity.clone());

    match cli.command {
        Some(Commands::Stats { year, json }) => {
            handlers::handle_stats(&config, &identity, year, json).await?;
        }
        Some(Commands::Heatmap { year }) => {
            handlers::handle_heatmap(&config, &identity, year).await?;
        }
        Some(Commands::Profile { json }) => {
            handlers::handle_profile(&config, &identity, json).await?;
        }
        Some(Commands::Config { action }) => {
            handlers::handle_config(&config, &action)?;
        }

        // No subcommand → launch TUI
        None => {
            // Panics on a current-thread runtime, where fetches could not
            // progress while the UI loop blocks.
            tokio::task::block_in_place(|| {
                tui::app::run(config, &identity, handlers::current_year())
            })?;
        }
    }

    Ok(())
}
