//! Generation agents for the travel pipeline
//!
//! Three agents share one shape: build a fixed system message plus a
//! templated user prompt, submit the two-message conversation through a
//! chat-completion client, return the response text verbatim. The response
//! is treated as opaque prose; nothing downstream parses it.

mod geolocation;
mod itinerary;
mod location;

pub use geolocation::HttpGeolocationAgent;
pub use itinerary::HttpItineraryAgent;
pub use location::HttpLocationAgent;

use crate::error::Result;
use async_trait::async_trait;

/// Suggests must-visit locations for a destination
#[async_trait]
pub trait LocationAgent: Send + Sync {
    async fn suggest_locations(&self, days: u32, destination: &str) -> Result<String>;
}

/// Builds a day-by-day itinerary from location suggestions
#[async_trait]
pub trait ItineraryAgent: Send + Sync {
    async fn create_itinerary(
        &self,
        days: u32,
        destination: &str,
        suggestions: &str,
    ) -> Result<String>;
}

/// Annotates an itinerary's destinations with coordinates
#[async_trait]
pub trait GeolocationAgent: Send + Sync {
    async fn annotate_geolocation(&self, itinerary: &str) -> Result<String>;
}
