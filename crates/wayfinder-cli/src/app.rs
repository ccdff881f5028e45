//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(
    author,
    version,
    about = "Travel itinerary planner with a semantic plan cache"
)]
pub struct Cli {
    /// Run without a subcommand for the interactive loop
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Database path (defaults to WAYFINDER_DB or the user cache dir)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Maximum L2 distance for a cached plan to count as a hit
    #[arg(long, global = true)]
    pub max_distance: Option<f32>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a single trip query and exit
    Plan(PlanArgs),

    /// Show plan cache status
    Status,

    /// Drop and recreate the plan cache
    Reset,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Travel query, e.g. "5 days in Paris"
    #[arg(required = true)]
    pub query: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
