use thiserror::Error;

/// Errors raised by the vector store client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VectorStoreError {
    #[error("missing required environment variable {0}")]
    Config(&'static str),

    #[error("vector store request failed with HTTP {code}: {body}")]
    Transport { code: u16, body: String },

    #[error("could not reach vector store: {0}")]
    Connection(String),
}
