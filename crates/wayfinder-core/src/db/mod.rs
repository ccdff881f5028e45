//! Plan store
//!
//! SQLite-backed storage for generated travel plans, keyed by destination
//! embeddings stored as BLOBs.

mod places;
mod schema;
pub mod vectors;

pub use places::{NewPlace, PlaceRecord};
pub use schema::{CollectionMeta, Database};

use std::path::PathBuf;

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CACHE_DIR_NAME)
            .join("plans.sqlite")
    }
}
