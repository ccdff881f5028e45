//! HTTP client for OpenAI-compatible backends (LM Studio, vLLM, OpenAI, etc.)

use crate::config::LLMServiceConfig;
use crate::error::{Result, WayfinderError};
use crate::llm::Embedder;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trait for chat-completion clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Submit a conversation and return the generated text, trimmed
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String>;

    /// Get chat model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Client for LM Studio and other OpenAI-compatible services. Serves both
/// chat completions and embeddings from the same configuration.
pub struct LmStudioClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
    embedding_dimensions: usize,
}

impl LmStudioClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WayfinderError::Config(format!("failed to build HTTP client: {}", e)))?;

        let embedding_dimensions = config
            .embedding_dimensions
            .unwrap_or(crate::DEFAULT_EMBEDDING_DIMENSIONS);

        Ok(Self {
            http_client,
            config,
            embedding_dimensions,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LLMServiceConfig::default())
    }

    fn bearer(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }
}

#[async_trait]
impl LLMClient for LmStudioClient {
    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        #[derive(Serialize)]
        struct ChatRequest {
            model: String,
            messages: Vec<ChatMessage>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            choices: Vec<ChatChoice>,
        }

        #[derive(Deserialize)]
        struct ChatChoice {
            message: ChatMessage,
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 1024,
        };

        let url = format!("{}/v1/chat/completions", self.config.url);
        let req = self.bearer(self.http_client.post(&url).json(&request));

        let response = req
            .send()
            .await
            .map_err(|e| WayfinderError::Generation(format!("completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WayfinderError::Generation(format!(
                "completion service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            WayfinderError::Generation(format!("malformed completion response: {}", e))
        })?;

        let content = chat_response
            .choices
            .first()
            .ok_or_else(|| {
                WayfinderError::Generation("completion response contained no choices".to_string())
            })?
            .message
            .content
            .trim()
            .to_string();

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl Embedder for LmStudioClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(WayfinderError::Embedding(
                "cannot embed empty text".to_string(),
            ));
        }

        let results = self.embed_batch(&[text.to_string()]).await?;
        results.into_iter().next().ok_or_else(|| {
            WayfinderError::Embedding("embedding service returned no vectors".to_string())
        })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        #[derive(Serialize)]
        struct EmbedRequest {
            model: String,
            input: Vec<String>,
        }

        #[derive(Deserialize)]
        struct EmbedResponse {
            data: Vec<EmbedData>,
        }

        #[derive(Deserialize)]
        struct EmbedData {
            embedding: Vec<f32>,
        }

        let request = EmbedRequest {
            model: self.config.embedding_model.clone(),
            input: texts.to_vec(),
        };

        let url = format!("{}/v1/embeddings", self.config.embeddings_url());
        let req = self.bearer(self.http_client.post(&url).json(&request));

        let response = req
            .send()
            .await
            .map_err(|e| WayfinderError::Embedding(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WayfinderError::Embedding(format!(
                "embedding service error (HTTP {}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response.json().await.map_err(|e| {
            WayfinderError::Embedding(format!("malformed embedding response: {}", e))
        })?;

        if embed_response.data.len() != texts.len() {
            return Err(WayfinderError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                embed_response.data.len()
            )));
        }

        let mut results = Vec::with_capacity(texts.len());
        for data in embed_response.data {
            if data.embedding.len() != self.embedding_dimensions {
                return Err(WayfinderError::Embedding(format!(
                    "embedding has {} dimensions, expected {}",
                    data.embedding.len(),
                    self.embedding_dimensions
                )));
            }
            results.push(data.embedding);
        }

        Ok(results)
    }

    fn dimensions(&self) -> usize {
        self.embedding_dimensions
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}
