//! Database schema and initialization

use crate::error::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

const CREATE_TABLES: &str = r#"
-- Cached travel plans, one row per generated destination
CREATE TABLE places (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 255),
    embedding BLOB NOT NULL,
    itinerary TEXT NOT NULL CHECK (length(itinerary) <= 20000),
    suggestions TEXT NOT NULL CHECK (length(suggestions) <= 20000),
    geolocation TEXT NOT NULL CHECK (length(geolocation) <= 20000),
    created_at TEXT NOT NULL
);

-- Embedder fingerprint the collection was built with
CREATE TABLE collection_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    model TEXT NOT NULL,
    dimensions INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
"#;

/// Embedder fingerprint stored alongside the collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMeta {
    pub model: String,
    pub dimensions: usize,
    pub created_at: String,
}

impl Database {
    /// Open database at path, creating if necessary
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| {
            crate::error::WayfinderError::StoreUnavailable(format!(
                "cannot open {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::apply_pragmas(&conn)?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::apply_pragmas(&conn)?;
        Ok(Self { conn })
    }

    fn apply_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    }

    /// Recreate the plan collection from scratch, discarding any stored
    /// plans. Records the embedder fingerprint so later opens can detect
    /// dimension or model changes.
    pub fn initialize(&self, dimensions: usize, embedding_model: &str) -> Result<()> {
        self.conn.execute_batch(
            "DROP TABLE IF EXISTS places;
             DROP TABLE IF EXISTS collection_meta;",
        )?;
        self.conn.execute_batch(CREATE_TABLES)?;
        self.conn.execute(
            "INSERT INTO collection_meta (id, model, dimensions, created_at)
             VALUES (1, ?1, ?2, ?3)",
            params![embedding_model, dimensions as i64, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Initialize only when the schema is absent or was built for a
    /// different embedder. Returns true when the collection was recreated.
    pub fn ensure_initialized(&self, dimensions: usize, embedding_model: &str) -> Result<bool> {
        match self.collection_meta()? {
            Some(meta) if meta.dimensions == dimensions && meta.model == embedding_model => {
                Ok(false)
            }
            Some(meta) => {
                tracing::warn!(
                    "collection was built with {} ({} dims), recreating for {} ({} dims)",
                    meta.model,
                    meta.dimensions,
                    embedding_model,
                    dimensions
                );
                self.initialize(dimensions, embedding_model)?;
                Ok(true)
            }
            None => {
                self.initialize(dimensions, embedding_model)?;
                Ok(true)
            }
        }
    }

    /// Stored embedder fingerprint, or None before first initialization
    pub fn collection_meta(&self) -> Result<Option<CollectionMeta>> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'collection_meta'",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Ok(None);
        }

        let meta = self
            .conn
            .query_row(
                "SELECT model, dimensions, created_at FROM collection_meta WHERE id = 1",
                [],
                |row| {
                    Ok(CollectionMeta {
                        model: row.get(0)?,
                        dimensions: row.get::<_, i64>(1)? as usize,
                        created_at: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(meta)
    }
}
