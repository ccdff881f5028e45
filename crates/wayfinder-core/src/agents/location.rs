//! Location suggestion agent

use super::LocationAgent;
use crate::config::LLMServiceConfig;
use crate::error::Result;
use crate::llm::{ChatMessage, LLMClient, LmStudioClient};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_MESSAGE: &str = "You are a travel assistant. Given the user's preferences, suggest \
     popular locations, landmarks, or activities to explore in a specific city or country. \
     Respond with a brief list of suggestions.";

/// Location suggestions via an external chat-completion service
pub struct HttpLocationAgent {
    client: Arc<dyn LLMClient>,
}

impl HttpLocationAgent {
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

fn build_prompt(days: u32, destination: &str) -> Vec<ChatMessage> {
    let prompt_text = format!(
        "The user wants to travel for {} days in {}. Please suggest some must-visit \
         locations, landmarks, or activities for them.",
        days, destination
    );
    vec![
        ChatMessage::system(SYSTEM_MESSAGE),
        ChatMessage::user(prompt_text),
    ]
}

#[async_trait]
impl LocationAgent for HttpLocationAgent {
    async fn suggest_locations(&self, days: u32, destination: &str) -> Result<String> {
        self.client
            .chat_completion(build_prompt(days, destination))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_a_system_user_conversation() {
        let messages = build_prompt(5, "Paris");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
    }

    #[test]
    fn prompt_includes_days_and_destination() {
        let messages = build_prompt(5, "Paris");
        assert!(messages[1].content.contains("5 days"));
        assert!(messages[1].content.contains("Paris"));
    }
}
