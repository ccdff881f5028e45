//! Wayfinder Core Library
//!
//! Semantically cached travel itinerary generation.
//!
//! # Features
//! - Three-agent generation pipeline (suggestions, itinerary, geolocation)
//!   over any OpenAI-compatible completion backend
//! - SQLite-backed plan store keyed by destination embeddings
//! - Nearest-neighbor cache lookup (exact scan or HNSW, L2 metric)

pub mod agents;
pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod planner;
pub mod search;

pub use agents::{
    GeolocationAgent, HttpGeolocationAgent, HttpItineraryAgent, HttpLocationAgent, ItineraryAgent,
    LocationAgent,
};
pub use config::{Config, LLMServiceConfig, StoreConfig};
pub use db::{CollectionMeta, Database, NewPlace, PlaceRecord};
pub use error::{Error, Result, WayfinderError};
pub use llm::{ChatMessage, Embedder, LLMClient, LmStudioClient};
pub use planner::{
    PlanObserver, PlanRequest, PlanSource, Planner, PlannerOptions, Stage, TravelPlan,
};
pub use search::PlaceIndex;

/// Default cache directory name
pub const CACHE_DIR_NAME: &str = "wayfinder";

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "wayfinder";

/// Embedding dimensions used when the config does not specify any
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
