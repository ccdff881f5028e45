//! Status command

use crate::app::OutputFormat;
use anyhow::Result;
use serde_json::json;
use std::path::Path;
use wayfinder_core::Database;

pub fn run(db_path: &Path, format: OutputFormat) -> Result<()> {
    let db = Database::open(db_path)?;

    let Some(meta) = db.collection_meta()? else {
        match format {
            OutputFormat::Json => println!("{}", json!({ "initialized": false })),
            OutputFormat::Cli => {
                println!("Plan cache not initialized (run a plan or `wayfinder reset` first).")
            }
        }
        return Ok(());
    };

    let count = db.count_places()?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "initialized": true,
                    "database": db_path.display().to_string(),
                    "embedding_model": meta.model,
                    "dimensions": meta.dimensions,
                    "plans": count,
                }))?
            );
        }
        OutputFormat::Cli => {
            println!("Database:    {}", db_path.display());
            println!("Model:       {} ({} dims)", meta.model, meta.dimensions);
            println!("Plans:       {}", count);
        }
    }
    Ok(())
}
