//! rcheckin library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! behind it: storage, repositories, view-state holders, export, location.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod location;
pub mod models;
pub mod repo;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use repo::Store;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, store: &Store) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Project { .. } => cli::commands::project::handle(&cli.command, cfg, store),
        Commands::Member { .. } => cli::commands::member::handle(&cli.command, cfg, store),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg, store),
        Commands::Records { .. } => cli::commands::records::handle(&cli.command, cfg, store),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, store),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, store),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, store),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` writes the configuration, so it runs before loading one
    if matches!(cli.command, Commands::Init) {
        return cli::commands::init::handle(&cli);
    }

    let mut cfg = Config::load()?;
    if let Some(dir) = &cli.data_dir {
        cfg.data_dir = Config::resolve_data_dir(dir);
    }

    let store = core::open_store(&cfg)?;
    let result = dispatch(&cli, &cfg, &store);
    store.registry().release_all()?;
    result
}
