use std::env;

use crate::error::EmbedderError;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
const DEFAULT_MODEL: &str = "text-embedding-3-small";
const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_BASE_DELAY_MS: u64 = 250;

/// Runtime configuration for [`crate::client::OpenAiEmbeddingClient`], read
/// from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedderConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
}

impl EmbedderConfig {
    /// Builds an [`EmbedderConfig`] from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedderError::Config`] if `OPENAI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, EmbedderError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| EmbedderError::Config("OPENAI_API_KEY"))?;
        let endpoint = env::var("OPENAI_EMBEDDING_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let retry_max_attempts = env::var("OPENAI_RETRY_MAX_ATTEMPTS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);
        let retry_base_delay_ms = env::var("OPENAI_RETRY_BASE_DELAY_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_BASE_DELAY_MS);

        Ok(Self {
            api_key,
            endpoint,
            model: DEFAULT_MODEL.to_string(),
            retry_max_attempts,
            retry_base_delay_ms,
        })
    }
}
