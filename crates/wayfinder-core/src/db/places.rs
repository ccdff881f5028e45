//! Plan record storage operations

use super::vectors::{bytes_to_embedding, embedding_to_bytes};
use super::Database;
use crate::error::{Result, WayfinderError};
use chrono::Utc;
use rusqlite::params;

/// A cached plan as stored in the collection
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub id: i64,
    pub name: String,
    pub itinerary: String,
    pub suggestions: String,
    pub geolocation: String,
    pub created_at: String,
}

/// A plan about to be persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewPlace<'a> {
    pub name: &'a str,
    pub embedding: &'a [f32],
    pub itinerary: &'a str,
    pub suggestions: &'a str,
    pub geolocation: &'a str,
}

impl Database {
    /// Append one plan record. The embedding must match the collection's
    /// dimensions; rows are never updated afterwards.
    pub fn insert_place(&self, place: &NewPlace) -> Result<i64> {
        let meta = self.collection_meta()?.ok_or_else(|| {
            WayfinderError::StoreUnavailable("collection not initialized".to_string())
        })?;
        if place.embedding.len() != meta.dimensions {
            return Err(WayfinderError::Embedding(format!(
                "embedding has {} dimensions, collection expects {}",
                place.embedding.len(),
                meta.dimensions
            )));
        }

        self.conn.execute(
            "INSERT INTO places (name, embedding, itinerary, suggestions, geolocation, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                place.name,
                embedding_to_bytes(place.embedding),
                place.itinerary,
                place.suggestions,
                place.geolocation,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Exact lookup by record id
    pub fn fetch_place(&self, id: i64) -> Result<Option<PlaceRecord>> {
        let result = self.conn.query_row(
            "SELECT id, name, itinerary, suggestions, geolocation, created_at
             FROM places WHERE id = ?1",
            params![id],
            |row| {
                Ok(PlaceRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    itinerary: row.get(2)?,
                    suggestions: row.get(3)?,
                    geolocation: row.get(4)?,
                    created_at: row.get(5)?,
                })
            },
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of cached plans
    pub fn count_places(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM places", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All stored embeddings, for nearest-neighbor search
    pub fn all_embeddings(&self) -> Result<Vec<(i64, Vec<f32>)>> {
        let mut stmt = self.conn.prepare("SELECT id, embedding FROM places")?;

        let results = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let embedding_bytes: Vec<u8> = row.get(1)?;
                Ok((id, bytes_to_embedding(&embedding_bytes)))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize(4, "test-model").unwrap();
        db
    }

    fn sample<'a>(name: &'a str, embedding: &'a [f32]) -> NewPlace<'a> {
        NewPlace {
            name,
            embedding,
            itinerary: "Day 1: walk around",
            suggestions: "old town, museum",
            geolocation: "old town: [1.0, 2.0]",
        }
    }

    #[test]
    fn insert_and_fetch_roundtrip() {
        let db = test_db();
        let id = db
            .insert_place(&sample("Paris", &[0.1, 0.2, 0.3, 0.4]))
            .unwrap();

        let record = db.fetch_place(id).unwrap().unwrap();
        assert_eq!(record.name, "Paris");
        assert_eq!(record.itinerary, "Day 1: walk around");
        assert_eq!(record.suggestions, "old town, museum");
        assert_eq!(record.geolocation, "old town: [1.0, 2.0]");
    }

    #[test]
    fn fetch_unknown_id_is_none() {
        let db = test_db();
        assert!(db.fetch_place(42).unwrap().is_none());
    }

    #[test]
    fn insert_rejects_dimension_mismatch() {
        let db = test_db();
        let err = db
            .insert_place(&sample("Paris", &[0.1, 0.2]))
            .unwrap_err();
        assert!(matches!(err, WayfinderError::Embedding(_)));
        assert_eq!(db.count_places().unwrap(), 0);
    }

    #[test]
    fn all_embeddings_returns_stored_vectors() {
        let db = test_db();
        let id = db
            .insert_place(&sample("Paris", &[1.0, 0.0, 0.0, 0.0]))
            .unwrap();

        let embeddings = db.all_embeddings().unwrap();
        assert_eq!(embeddings, vec![(id, vec![1.0, 0.0, 0.0, 0.0])]);
    }

    #[test]
    fn initialize_discards_existing_plans() {
        let db = test_db();
        db.insert_place(&sample("Paris", &[0.1, 0.2, 0.3, 0.4]))
            .unwrap();
        assert_eq!(db.count_places().unwrap(), 1);

        db.initialize(4, "test-model").unwrap();
        assert_eq!(db.count_places().unwrap(), 0);
        assert!(db.all_embeddings().unwrap().is_empty());
    }
}
