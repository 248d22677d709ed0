use thiserror::Error;

/// Errors raised while requesting embeddings from the provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbedderError {
    #[error("missing required environment variable {0}")]
    Config(&'static str),

    #[error("embedding provider returned HTTP {code}: {message}")]
    Transport { code: Option<u16>, message: String },

    #[error("embedding provider returned no embedding for input index {index}")]
    MissingEmbedding { index: usize },
}

impl EmbedderError {
    /// Transient failures the caller's retry loop should attempt again:
    /// HTTP 429, any 5xx, or a connection-level failure (no status code).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            EmbedderError::Transport { code: None, .. } => true,
            EmbedderError::Transport { code: Some(code), .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}
