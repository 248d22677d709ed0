use std::env;

use crate::error::VectorStoreError;

/// Runtime configuration for [`crate::client::QdrantClient`], read from
/// `QDRANT_URL`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorStoreConfig {
    pub base_url: String,
}

impl VectorStoreConfig {
    /// # Errors
    ///
    /// Returns [`VectorStoreError::Config`] if `QDRANT_URL` is unset.
    pub fn from_env() -> Result<Self, VectorStoreError> {
        let base_url = env::var("QDRANT_URL").map_err(|_| VectorStoreError::Config("QDRANT_URL"))?;
        Ok(Self { base_url })
    }
}
