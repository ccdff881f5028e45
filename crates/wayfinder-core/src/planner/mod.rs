//! Cache-or-generate planning
//!
//! One query turn: embed the destination, look up the nearest cached plan,
//! and either serve it or run the three-agent generation pipeline
//! (suggestions, itinerary, geolocation) and persist the result keyed by a
//! fresh embedding of the destination name.

use crate::agents::{GeolocationAgent, ItineraryAgent, LocationAgent};
use crate::db::{Database, NewPlace, PlaceRecord};
use crate::error::{Result, WayfinderError};
use crate::llm::Embedder;
use crate::search::PlaceIndex;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// One parsed user query, alive for a single turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub days: u32,
    pub destination: String,
}

impl PlanRequest {
    /// Parse free text of the form `<days> days in <destination>`
    pub fn parse(input: &str) -> Result<Self> {
        let (days, destination) = input.split_once(" days in ").ok_or_else(|| {
            WayfinderError::InvalidInput(
                "expected travel details in the format '<days> days in <city or country>'"
                    .to_string(),
            )
        })?;

        let days: u32 = days.trim().parse().map_err(|_| {
            WayfinderError::InvalidInput(format!("'{}' is not a day count", days.trim()))
        })?;
        if days == 0 {
            return Err(WayfinderError::InvalidInput(
                "day count must be at least 1".to_string(),
            ));
        }

        let destination = destination.trim();
        if destination.is_empty() {
            return Err(WayfinderError::InvalidInput(
                "destination must not be empty".to_string(),
            ));
        }

        Ok(Self {
            days,
            destination: destination.to_string(),
        })
    }
}

/// Generation pipeline steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Suggestions,
    Itinerary,
    Geolocation,
}

/// Observer for pipeline progress, e.g. a CLI spinner. Callbacks fire
/// synchronously around each agent call; `stage_finished` runs before the
/// stage's output is consumed.
pub trait PlanObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _stage: Stage) {}
}

/// Where a returned plan came from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    Cache { distance: f32 },
    Generated,
}

/// A complete plan, served from cache or freshly generated
#[derive(Debug, Clone, Serialize)]
pub struct TravelPlan {
    pub destination: String,
    pub suggestions: String,
    pub itinerary: String,
    pub geolocation: String,
    pub source: PlanSource,
}

impl TravelPlan {
    fn from_record(record: PlaceRecord, distance: f32) -> Self {
        Self {
            destination: record.name,
            suggestions: record.suggestions,
            itinerary: record.itinerary,
            geolocation: record.geolocation,
            source: PlanSource::Cache { distance },
        }
    }
}

/// Planner tuning knobs
#[derive(Debug, Clone, Default)]
pub struct PlannerOptions {
    /// Maximum L2 distance for a stored plan to count as a hit.
    /// None serves any nearest neighbor, however far.
    pub max_distance: Option<f32>,
}

struct GenerationBundle {
    suggestions: String,
    itinerary: String,
    geolocation: String,
}

/// The cache-or-generate orchestrator. Owns the store handles and the
/// agent pipeline; processes one query turn at a time.
pub struct Planner {
    db: Database,
    index: PlaceIndex,
    embedder: Arc<dyn Embedder>,
    locations: Arc<dyn LocationAgent>,
    itineraries: Arc<dyn ItineraryAgent>,
    geolocations: Arc<dyn GeolocationAgent>,
    options: PlannerOptions,
}

impl Planner {
    pub fn new(
        db: Database,
        embedder: Arc<dyn Embedder>,
        locations: Arc<dyn LocationAgent>,
        itineraries: Arc<dyn ItineraryAgent>,
        geolocations: Arc<dyn GeolocationAgent>,
        options: PlannerOptions,
    ) -> Self {
        Self {
            db,
            index: PlaceIndex::new(),
            embedder,
            locations,
            itineraries,
            geolocations,
            options,
        }
    }

    /// The underlying plan store
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Answer one query: serve the nearest cached plan if one qualifies,
    /// otherwise generate, persist, and return a fresh one. Nothing is
    /// persisted unless the whole pipeline succeeds.
    pub async fn plan(
        &self,
        request: &PlanRequest,
        observer: Option<&dyn PlanObserver>,
    ) -> Result<TravelPlan> {
        let query_vector = self.embedder.embed(&request.destination).await?;

        self.index.refresh(&self.db)?;
        if let Some((id, distance)) = self.index.nearest(&query_vector) {
            let within = self.options.max_distance.map_or(true, |max| distance <= max);
            if within {
                if let Some(record) = self.db.fetch_place(id)? {
                    tracing::info!(
                        destination = %request.destination,
                        cached = %record.name,
                        distance,
                        "serving cached plan"
                    );
                    return Ok(TravelPlan::from_record(record, distance));
                }
                // Index snapshot pointed at a row that no longer exists
                // (collection was reset underneath us); fall through and
                // regenerate.
                tracing::warn!(id, "nearest neighbor has no backing record");
            } else {
                tracing::debug!(
                    distance,
                    max_distance = self.options.max_distance.unwrap_or(f32::NAN),
                    "nearest neighbor too far, generating"
                );
            }
        }

        let bundle = self.generate(request, observer).await?;

        // The cache key is always derived fresh from the canonical
        // destination string, not reused from the lookup.
        let key = self.embedder.embed(&request.destination).await?;
        self.db.insert_place(&NewPlace {
            name: &request.destination,
            embedding: &key,
            itinerary: &bundle.itinerary,
            suggestions: &bundle.suggestions,
            geolocation: &bundle.geolocation,
        })?;
        self.index.invalidate();

        tracing::info!(destination = %request.destination, "stored generated plan");

        Ok(TravelPlan {
            destination: request.destination.clone(),
            suggestions: bundle.suggestions,
            itinerary: bundle.itinerary,
            geolocation: bundle.geolocation,
            source: PlanSource::Generated,
        })
    }

    /// Run the three agents strictly in order, each output feeding the
    /// next prompt verbatim.
    async fn generate(
        &self,
        request: &PlanRequest,
        observer: Option<&dyn PlanObserver>,
    ) -> Result<GenerationBundle> {
        let suggestions = run_stage(
            observer,
            Stage::Suggestions,
            self.locations
                .suggest_locations(request.days, &request.destination),
        )
        .await?;

        let itinerary = run_stage(
            observer,
            Stage::Itinerary,
            self.itineraries
                .create_itinerary(request.days, &request.destination, &suggestions),
        )
        .await?;

        let geolocation = run_stage(
            observer,
            Stage::Geolocation,
            self.geolocations.annotate_geolocation(&itinerary),
        )
        .await?;

        Ok(GenerationBundle {
            suggestions,
            itinerary,
            geolocation,
        })
    }
}

async fn run_stage<F>(
    observer: Option<&dyn PlanObserver>,
    stage: Stage,
    task: F,
) -> Result<String>
where
    F: Future<Output = Result<String>>,
{
    if let Some(obs) = observer {
        obs.stage_started(stage);
    }
    let result = task.await;
    if let Some(obs) = observer {
        obs.stage_finished(stage);
    }
    result
}
