//! rContaPyme library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod reader;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use cli::response::{ErrorResponse, print_json};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg, cli.json),
        Commands::Preview { .. } => cli::commands::preview::handle(&cli.command, cfg, cli.json),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, cli.json),
        Commands::Cleanup => cli::commands::cleanup::handle(&cli.command, cfg, cli.json),
    }
}

/// Load the configuration once and apply the command-line overrides.
fn effective_config(cli: &Cli) -> AppResult<Config> {
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(uploads) = &cli.uploads {
        cfg.uploads_dir = uploads.clone();
    }

    Ok(cfg)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // stdout is reserved for the JSON document
    ui::messages::route_to_stderr(cli.json);

    let result = effective_config(&cli).and_then(|cfg| dispatch(&cli, &cfg));

    if let Err(e) = &result
        && cli.json
    {
        print_json(&ErrorResponse::new(e.to_string()))?;
    }

    result
}
