//! CLI command implementations

pub mod plan;
pub mod repl;
pub mod reset;
pub mod status;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use wayfinder_core::{
    Config, Database, Embedder, HttpGeolocationAgent, HttpItineraryAgent, HttpLocationAgent,
    LmStudioClient, Planner, PlannerOptions,
};

/// Open the store and wire the client, agents, and embedder into a planner
pub fn build_planner(config: &Config, db_path: &Path) -> Result<Planner> {
    let db = Database::open(db_path)?;

    let client = Arc::new(LmStudioClient::new(config.llm_service.clone())?);
    let embedder: Arc<dyn Embedder> = client.clone();

    // Recreates the collection when the embedder fingerprint changed
    db.ensure_initialized(embedder.dimensions(), embedder.model_name())?;
    tracing::debug!("using plan store at {}", db_path.display());

    let locations = Arc::new(HttpLocationAgent::new(client.clone()));
    let itineraries = Arc::new(HttpItineraryAgent::new(client.clone()));
    let geolocations = Arc::new(HttpGeolocationAgent::new(client));

    Ok(Planner::new(
        db,
        embedder,
        locations,
        itineraries,
        geolocations,
        PlannerOptions {
            max_distance: config.max_distance,
        },
    ))
}
