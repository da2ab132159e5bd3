//! fieldtrack library root.
//! Exposes the CLI parser, the async run() entry point, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::{Backend, Config};
use errors::AppResult;
use tracing::debug;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli, cfg),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Technician { action } => commands::technician::handle(action, cfg).await,
        Commands::Project { action } => commands::project::handle(action, cfg).await,
        Commands::Task { action } => commands::task::handle(action, cfg).await,
        Commands::Zone { action } => commands::zone::handle(action, cfg).await,
        Commands::Location { action } => commands::location::handle(action, cfg).await,
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Test mode never reads the user's config file.
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    if let Some(custom_db) = &cli.db {
        cfg.backend = Backend::Sqlite;
        cfg.database = custom_db.clone();
    }
    if let Some(url) = &cli.geocoder_url {
        cfg.geocoder.url = url.clone();
    }

    debug!(backend = ?cfg.backend, database = %cfg.database, "configuration loaded");
    dispatch(&cli, &cfg).await
}
