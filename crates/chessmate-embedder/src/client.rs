use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::EmbedderConfig;
use crate::error::EmbedderError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    #[serde(default)]
    data: Vec<EmbeddingDatum>,
    #[serde(default)]
    error: Option<EmbeddingErrorBody>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct EmbeddingErrorBody {
    message: String,
}

/// A client capable of turning FEN strings into embedding vectors. The
/// trait is the worker's test-hook seam: production code talks to
/// [`OpenAiEmbeddingClient`], unit tests can substitute any in-process
/// fake without touching call sites.
pub trait EmbeddingClient: Send + Sync {
    fn embed_batch(
        &self,
        inputs: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, EmbedderError>> + Send;
}

/// HTTP client for an OpenAI-compatible embeddings endpoint, with
/// exponential-backoff retry on transient failures (HTTP 429, 5xx, or a
/// connection-level error).
pub struct OpenAiEmbeddingClient {
    http: reqwest::Client,
    config: EmbedderConfig,
}

impl OpenAiEmbeddingClient {
    #[must_use]
    pub fn new(config: EmbedderConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client builder with static config never fails");
        Self { http, config }
    }

    async fn request_once(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let body = EmbeddingRequest {
            model: &self.config.model,
            input: inputs,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| EmbedderError::Transport {
                code: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            })?;

        let status = response.status();
        let parsed: EmbeddingResponse = response.json().await.map_err(|err| EmbedderError::Transport {
            code: Some(status.as_u16()),
            message: err.to_string(),
        })?;

        if !status.is_success() {
            let message = parsed
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("embedding request failed with status {status}"));
            return Err(EmbedderError::Transport {
                code: Some(status.as_u16()),
                message,
            });
        }

        if parsed.data.len() != inputs.len() {
            return Err(EmbedderError::MissingEmbedding { index: parsed.data.len() });
        }

        Ok(parsed.data.into_iter().map(|d| d.embedding).collect())
    }
}

impl EmbeddingClient for OpenAiEmbeddingClient {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.request_once(inputs).await {
                Ok(vectors) => return Ok(vectors),
                Err(err) if err.is_retryable() && attempt < self.config.retry_max_attempts => {
                    let delay = self.config.retry_base_delay_ms * 2u64.pow(attempt - 1);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn test_config() -> EmbedderConfig {
        EmbedderConfig {
            api_key: "sk-test".to_string(),
            endpoint: "http://127.0.0.1:1/embeddings".to_string(),
            model: "text-embedding-3-small".to_string(),
            retry_max_attempts: 3,
            retry_base_delay_ms: 1,
        }
    }

    #[test]
    fn transport_without_status_is_retryable() {
        let err = EmbedderError::Transport { code: None, message: "connect refused".into() };
        assert!(err.is_retryable());
    }

    #[test]
    fn transport_429_and_5xx_are_retryable() {
        assert!(EmbedderError::Transport { code: Some(429), message: String::new() }.is_retryable());
        assert!(EmbedderError::Transport { code: Some(503), message: String::new() }.is_retryable());
    }

    #[test]
    fn transport_4xx_other_than_429_is_not_retryable() {
        assert!(!EmbedderError::Transport { code: Some(401), message: String::new() }.is_retryable());
    }

    #[tokio::test]
    async fn embed_batch_exhausts_retries_against_an_unreachable_endpoint() {
        let client = OpenAiEmbeddingClient::new(test_config());
        let counter = AtomicU32::new(0);
        let result = client.embed_batch(&["8/8/8/8/8/8/8/8 w - - 0 1".to_string()]).await;
        counter.fetch_add(1, Ordering::SeqCst);
        assert!(result.is_err());
    }
}
