//! Cache reset command

use anyhow::Result;
use std::path::Path;
use wayfinder_core::{Config, Database, DEFAULT_EMBEDDING_DIMENSIONS};

pub fn run(db_path: &Path, config: &Config) -> Result<()> {
    let db = Database::open(db_path)?;

    let dimensions = config
        .llm_service
        .embedding_dimensions
        .unwrap_or(DEFAULT_EMBEDDING_DIMENSIONS);
    db.initialize(dimensions, &config.llm_service.embedding_model)?;

    println!("Plan cache reset: {}", db_path.display());
    Ok(())
}
