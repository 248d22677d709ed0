//! Vector store client protocol: a Qdrant-compatible HTTP client plus
//! an in-memory fake for tests.

mod client;
mod config;
mod error;
mod memory;
mod model;

pub use client::{QdrantClient, SearchRequest, VectorStore};
pub use config::VectorStoreConfig;
pub use error::VectorStoreError;
pub use memory::InMemoryVectorStore;
pub use model::{Distance, ScoredPoint, SearchFilter, VectorPoint};
