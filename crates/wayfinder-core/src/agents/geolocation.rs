//! Geolocation annotation agent

use super::GeolocationAgent;
use crate::config::LLMServiceConfig;
use crate::error::Result;
use crate::llm::{ChatMessage, LLMClient, LmStudioClient};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_MESSAGE: &str = "You are a geolocation assistant. Given a list of destinations for \
     each day in a travel itinerary, provide the latitude and longitude for each destination. \
     Respond with the location name, latitude, and longitude in the format: \
     'location_name: [latitude, longitude]'.";

/// Coordinate annotations via an external chat-completion service.
/// The requested format is a hint to the model only; the response is stored
/// as plain text and never parsed.
pub struct HttpGeolocationAgent {
    client: Arc<dyn LLMClient>,
}

impl HttpGeolocationAgent {
    /// Create from LLM client
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    /// Create from configuration
    pub fn from_config(config: LLMServiceConfig) -> Result<Self> {
        let client = LmStudioClient::new(config)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }
}

fn build_prompt(itinerary: &str) -> Vec<ChatMessage> {
    let prompt_text = format!(
        "Based on the following travel itinerary, provide the latitude and longitude for each \
         destination. Output the data in the format: 'location_name: [latitude, longitude]'. \
         Itinerary: {}",
        itinerary
    );
    vec![
        ChatMessage::system(SYSTEM_MESSAGE),
        ChatMessage::user(prompt_text),
    ]
}

#[async_trait]
impl GeolocationAgent for HttpGeolocationAgent {
    async fn annotate_geolocation(&self, itinerary: &str) -> Result<String> {
        self.client.chat_completion(build_prompt(itinerary)).await
    }
}
