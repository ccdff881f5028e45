//! Approximate nearest neighbor index over plan embeddings
//!
//! Small collections are scanned exactly; an HNSW index takes over once the
//! collection is large enough to justify the build cost.

use crate::db::vectors::l2_distance;
use crate::db::Database;
use crate::error::{Result, WayfinderError};
use instant_distance::{Builder, HnswMap, Search};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Minimum embedding count to justify building an HNSW index.
/// Below this threshold, an exact scan is fast enough.
const ANN_THRESHOLD: usize = 256;

/// Wrapper for f32 vectors implementing instant_distance::Point
#[derive(Clone)]
struct EmbeddingPoint {
    values: Vec<f32>,
}

impl instant_distance::Point for EmbeddingPoint {
    fn distance(&self, other: &Self) -> f32 {
        l2_distance(&self.values, &other.values)
    }
}

/// Nearest-neighbor index over the plan collection.
///
/// The index is rebuilt lazily from the database: `refresh` is a no-op
/// until `invalidate` marks the snapshot stale, so callers refresh before
/// every search and recent inserts become visible.
pub struct PlaceIndex {
    rows: RwLock<Vec<(i64, Vec<f32>)>>,
    hnsw: RwLock<Option<HnswMap<EmbeddingPoint, i64>>>,
    stale: AtomicBool,
}

impl PlaceIndex {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            hnsw: RwLock::new(None),
            stale: AtomicBool::new(true),
        }
    }

    /// Reload the snapshot from the database if it is stale
    pub fn refresh(&self, db: &Database) -> Result<()> {
        if !self.stale.load(Ordering::Acquire) {
            return Ok(());
        }

        let embeddings = db.all_embeddings()?;

        let map = if embeddings.len() >= ANN_THRESHOLD {
            let (points, ids): (Vec<EmbeddingPoint>, Vec<i64>) = embeddings
                .iter()
                .map(|(id, values)| {
                    (
                        EmbeddingPoint {
                            values: values.clone(),
                        },
                        *id,
                    )
                })
                .unzip();
            tracing::debug!("building HNSW index over {} embeddings", points.len());
            Some(Builder::default().build(points, ids))
        } else {
            None
        };

        *self.rows.write().map_err(lock_poisoned)? = embeddings;
        *self.hnsw.write().map_err(lock_poisoned)? = map;
        self.stale.store(false, Ordering::Release);
        Ok(())
    }

    /// Mark the snapshot stale; the next `refresh` reloads from the database
    pub fn invalidate(&self) {
        self.stale.store(true, Ordering::Release);
    }

    /// Closest stored embedding to the query, as (record id, L2 distance).
    /// Returns None when the collection is empty. Hit-or-miss policy is the
    /// caller's concern.
    pub fn nearest(&self, query: &[f32]) -> Option<(i64, f32)> {
        if let Ok(guard) = self.hnsw.read() {
            if let Some(map) = guard.as_ref() {
                let point = EmbeddingPoint {
                    values: query.to_vec(),
                };
                let mut search = Search::default();
                return map
                    .search(&point, &mut search)
                    .next()
                    .map(|item| (*item.value, item.distance));
            }
        }

        let rows = self.rows.read().ok()?;
        rows.iter()
            .map(|(id, values)| (*id, l2_distance(query, values)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Whether the HNSW index is active (vs. exact scan)
    pub fn is_built(&self) -> bool {
        self.hnsw.read().map(|g| g.is_some()).unwrap_or(false)
    }
}

impl Default for PlaceIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_poisoned<T>(e: std::sync::PoisonError<T>) -> WayfinderError {
    WayfinderError::StoreUnavailable(format!("index lock poisoned: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewPlace;

    fn setup_db(count: usize) -> Database {
        let db = Database::open_in_memory().unwrap();
        db.initialize(4, "test-model").unwrap();

        for i in 0..count {
            let embedding = vec![
                (i as f32).sin(),
                (i as f32).cos(),
                (i as f32 * 0.5).sin(),
                (i as f32 * 0.5).cos(),
            ];
            db.insert_place(&NewPlace {
                name: &format!("place {}", i),
                embedding: &embedding,
                itinerary: "it",
                suggestions: "sg",
                geolocation: "geo",
            })
            .unwrap();
        }

        db
    }

    #[test]
    fn nearest_on_empty_collection_is_none() {
        let db = setup_db(0);
        let index = PlaceIndex::new();
        index.refresh(&db).unwrap();

        assert!(index.nearest(&[0.0, 0.0, 0.0, 0.0]).is_none());
        assert!(!index.is_built());
    }

    #[test]
    fn exact_scan_finds_closest_record() {
        let db = setup_db(3);
        let target = db
            .insert_place(&NewPlace {
                name: "target",
                embedding: &[10.0, 10.0, 10.0, 10.0],
                itinerary: "it",
                suggestions: "sg",
                geolocation: "geo",
            })
            .unwrap();

        let index = PlaceIndex::new();
        index.refresh(&db).unwrap();

        let (id, distance) = index.nearest(&[10.0, 10.0, 10.0, 10.1]).unwrap();
        assert_eq!(id, target);
        assert!(distance < 0.2);
        assert!(!index.is_built());
    }

    #[test]
    fn hnsw_takes_over_above_threshold() {
        let db = setup_db(ANN_THRESHOLD + 10);
        let index = PlaceIndex::new();
        index.refresh(&db).unwrap();

        assert!(index.is_built());
        let query = vec![0.0f32.sin(), 0.0f32.cos(), 0.0, 1.0];
        let (_, distance) = index.nearest(&query).unwrap();
        assert!(distance.is_finite());
    }

    #[test]
    fn refresh_skips_until_invalidated() {
        let db = setup_db(1);
        let index = PlaceIndex::new();
        index.refresh(&db).unwrap();

        let late = db
            .insert_place(&NewPlace {
                name: "late",
                embedding: &[5.0, 5.0, 5.0, 5.0],
                itinerary: "it",
                suggestions: "sg",
                geolocation: "geo",
            })
            .unwrap();

        // Snapshot is still the old one
        let (id, _) = index.nearest(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_ne!(id, late);

        index.invalidate();
        index.refresh(&db).unwrap();
        let (id, distance) = index.nearest(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert_eq!(id, late);
        assert_eq!(distance, 0.0);
    }
}
