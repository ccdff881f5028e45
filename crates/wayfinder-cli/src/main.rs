//! Wayfinder CLI
//!
//! Travel itinerary planning with a semantic plan cache.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wayfinder_core::{error::exit_codes, Config, Database, WayfinderError};

mod app;
mod commands;
mod output;
mod progress;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        let code = err
            .downcast_ref::<WayfinderError>()
            .map(WayfinderError::exit_code)
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if cli.max_distance.is_some() {
        config.max_distance = cli.max_distance;
    }

    // Database path: --db flag, then WAYFINDER_DB, then config, then default
    let db_path = cli
        .db
        .clone()
        .or_else(|| std::env::var("WAYFINDER_DB").map(PathBuf::from).ok())
        .or_else(|| config.store.path.clone())
        .unwrap_or_else(Database::default_path);

    match cli.command {
        Some(Commands::Status) => commands::status::run(&db_path, cli.format),
        Some(Commands::Reset) => commands::reset::run(&db_path, &config),
        Some(Commands::Plan(args)) => {
            let planner = commands::build_planner(&config, &db_path)?;
            commands::plan::run(args, &planner, cli.format).await
        }
        None => {
            let planner = commands::build_planner(&config, &db_path)?;
            commands::repl::run(&planner, cli.format).await
        }
    }
}
