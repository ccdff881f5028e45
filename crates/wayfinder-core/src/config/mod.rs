//! Configuration management

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM service configuration
    #[serde(default)]
    pub llm_service: LLMServiceConfig,

    /// Plan store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Maximum L2 distance for a stored plan to count as a cache hit.
    /// Unset, any nearest neighbor is served regardless of distance.
    #[serde(default)]
    pub max_distance: Option<f32>,
}

/// LLM service configuration for external inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMServiceConfig {
    /// Base URL of the completion backend (LM Studio, vLLM, OpenAI, etc.)
    pub url: String,

    /// Model name for chat completions
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Base URL for the embeddings service (can be different from the LLM URL)
    #[serde(default)]
    pub embedding_url: Option<String>,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Embedding dimensions
    #[serde(default)]
    pub embedding_dimensions: Option<usize>,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LLMServiceConfig {
    /// Get the embeddings URL (falls back to main URL if not specified)
    pub fn embeddings_url(&self) -> &str {
        self.embedding_url.as_deref().unwrap_or(&self.url)
    }
}

impl Default for LLMServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("WAYFINDER_LLM_URL")
                .unwrap_or_else(|_| "http://localhost:1234".to_string()),
            model: default_chat_model(),
            embedding_url: std::env::var("WAYFINDER_EMBEDDING_URL").ok(),
            embedding_model: default_embedding_model(),
            embedding_dimensions: std::env::var("WAYFINDER_EMBEDDING_DIMS")
                .ok()
                .and_then(|s| s.parse().ok()),
            api_key: std::env::var("WAYFINDER_LLM_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_chat_model() -> String {
    std::env::var("WAYFINDER_LLM_MODEL").unwrap_or_else(|_| "qwen2.5-7b-instruct".to_string())
}

fn default_embedding_model() -> String {
    std::env::var("WAYFINDER_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "sentence-transformers/all-MiniLM-L6-v2".to_string())
}

fn default_timeout() -> u64 {
    30
}

/// Plan store configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Database path; `WAYFINDER_DB` and `--db` take precedence
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_yaml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeddings_url_falls_back_to_llm_url() {
        let config = LLMServiceConfig {
            url: "http://localhost:1234".to_string(),
            model: "m".to_string(),
            embedding_url: None,
            embedding_model: "e".to_string(),
            embedding_dimensions: None,
            api_key: None,
            timeout_secs: 30,
        };
        assert_eq!(config.embeddings_url(), "http://localhost:1234");
    }

    #[test]
    fn embeddings_url_prefers_dedicated_endpoint() {
        let config = LLMServiceConfig {
            url: "http://localhost:1234".to_string(),
            embedding_url: Some("http://localhost:8080".to_string()),
            model: "m".to_string(),
            embedding_model: "e".to_string(),
            embedding_dimensions: None,
            api_key: None,
            timeout_secs: 30,
        };
        assert_eq!(config.embeddings_url(), "http://localhost:8080");
    }

    #[test]
    fn config_parses_max_distance() {
        let yaml = "max_distance: 0.75\nllm_service:\n  url: http://localhost:9999\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.max_distance, Some(0.75));
        assert_eq!(config.llm_service.url, "http://localhost:9999");
    }
}
