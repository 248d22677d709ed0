//! OpenAI-compatible embedding provider client.
//!
//! Turns a batch of FEN strings into embedding vectors over HTTP,
//! retrying transient failures (HTTP 429, 5xx, connection errors) with
//! exponential backoff.

mod client;
mod config;
mod error;

pub use client::{EmbeddingClient, OpenAiEmbeddingClient};
pub use config::EmbedderConfig;
pub use error::EmbedderError;
