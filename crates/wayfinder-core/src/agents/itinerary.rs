//! Itinerary planning agent

use super::ItineraryAgent;
use crate::config::LLMServiceConfig;
use crate::error::Result;
use crate::llm::{ChatMessage, LLMClient, LmStudioClient};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_MESSAGE: &str = "You are a travel itinerary planner. Based on the given locations, \
     create a detailed day-by-day itinerary for the user to explore a city or country over a \
     specific number of days. Include activities, recommended times for each day, and suggest \
     the best time of day to visit each location for the fullest experience. For each day, \
     suggest breakfast, lunch, and dinner options that are within the route of the planned \
     destinations.";

/// Day-by-day itineraries via an external chat-completion service
pub struct HttpItineraryAgent {
    client: Arc<dyn LLMClient>,
}

impl HttpItineraryAgent {
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

fn build_prompt(days: u32, destination: &str, suggestions: &str) -> Vec<ChatMessage> {
    let prompt_text = format!(
        "The user is traveling to {} for {} days. Based on the following suggestions: {}, \
         please create a detailed itinerary with daily activities, including the best times \
         of day to visit each place for the fullest experience. Also suggest places for \
         breakfast, lunch, and dinner each day that are within the route of the destinations.",
        destination, days, suggestions
    );
    vec![
        ChatMessage::system(SYSTEM_MESSAGE),
        ChatMessage::user(prompt_text),
    ]
}

#[async_trait]
impl ItineraryAgent for HttpItineraryAgent {
    async fn create_itinerary(
        &self,
        days: u32,
        destination: &str,
        suggestions: &str,
    ) -> Result<String> {
        self.client
            .chat_completion(build_prompt(days, destination, suggestions))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_threads_suggestions_verbatim() {
        let messages = build_prompt(3, "Tokyo", "Senso-ji; Shibuya Crossing");
        assert!(messages[1].content.contains("Senso-ji; Shibuya Crossing"));
        assert!(messages[1].content.contains("Tokyo"));
        assert!(messages[1].content.contains("3 days"));
    }
}
