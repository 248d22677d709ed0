use serde_json::{json, Value};

use crate::config::VectorStoreConfig;
use crate::error::VectorStoreError;
use crate::model::{Distance, ScoredPoint, SearchFilter, VectorPoint};

/// Parameters for [`VectorStore::vector_search`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub vector: Vec<f32>,
    pub filters: Vec<SearchFilter>,
    pub limit: u64,
}

/// The vector store's upsert/search/ensure-collection protocol. A
/// trait so the embedding worker and query path can swap in an in-memory
/// fake under test without changing call sites.
pub trait VectorStore: Send + Sync {
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
        distance: Distance,
    ) -> impl Future<Output = Result<(), VectorStoreError>> + Send;

    fn upsert_points(
        &self,
        name: &str,
        points: &[VectorPoint],
    ) -> impl Future<Output = Result<(), VectorStoreError>> + Send;

    fn vector_search(
        &self,
        name: &str,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<ScoredPoint>, VectorStoreError>> + Send;
}

/// HTTP client for a Qdrant-compatible vector store.
pub struct QdrantClient {
    http: reqwest::Client,
    config: VectorStoreConfig,
}

impl QdrantClient {
    #[must_use]
    pub fn new(config: VectorStoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn connection_err(err: reqwest::Error) -> VectorStoreError {
        VectorStoreError::Connection(err.to_string())
    }
}

impl VectorStore for QdrantClient {
    async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
        distance: Distance,
    ) -> Result<(), VectorStoreError> {
        let get_resp = self
            .http
            .get(self.url(&format!("/collections/{name}")))
            .send()
            .await
            .map_err(Self::connection_err)?;

        if get_resp.status() != reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = json!({
            "vectors": { "size": vector_size, "distance": distance.as_wire_str() },
            "payload_schema": {
                "game_id": "integer",
                "fen": "keyword",
                "white": "keyword",
                "black": "keyword",
                "opening_slug": "keyword",
            },
        });

        let put_resp = self
            .http
            .put(self.url(&format!("/collections/{name}")))
            .json(&body)
            .send()
            .await
            .map_err(Self::connection_err)?;

        let status = put_resp.status();
        if status == reqwest::StatusCode::OK
            || status == reqwest::StatusCode::CREATED
            || status == reqwest::StatusCode::ACCEPTED
        {
            Ok(())
        } else {
            let body = put_resp.text().await.unwrap_or_default();
            Err(VectorStoreError::Transport { code: status.as_u16(), body })
        }
    }

    async fn upsert_points(&self, name: &str, points: &[VectorPoint]) -> Result<(), VectorStoreError> {
        let body = json!({ "points": points });
        let response = self
            .http
            .post(self.url(&format!("/collections/{name}/points")))
            .json(&body)
            .send()
            .await
            .map_err(Self::connection_err)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(VectorStoreError::Transport { code: status.as_u16(), body })
        }
    }

    async fn vector_search(
        &self,
        name: &str,
        request: &SearchRequest,
    ) -> Result<Vec<ScoredPoint>, VectorStoreError> {
        let filter: Option<Value> = if request.filters.is_empty() {
            None
        } else {
            let must: Vec<Value> = request
                .filters
                .iter()
                .map(|f| json!({ "key": f.field, "match": { "value": f.value } }))
                .collect();
            Some(json!({ "must": must }))
        };

        let body = json!({
            "vector": { "name": "default", "vector": request.vector },
            "with_payload": true,
            "limit": request.limit,
            "filter": filter,
        });

        let response = self
            .http
            .post(self.url(&format!("/collections/{name}/points/search")))
            .json(&body)
            .send()
            .await
            .map_err(Self::connection_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VectorStoreError::Transport { code: status.as_u16(), body });
        }

        #[derive(serde::Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            result: Vec<ScoredPoint>,
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|err| VectorStoreError::Connection(err.to_string()))?;
        Ok(parsed.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_wire_strings_match_qdrant_naming() {
        assert_eq!(Distance::Cosine.as_wire_str(), "Cosine");
        assert_eq!(Distance::Euclidean.as_wire_str(), "Euclid");
        assert_eq!(Distance::Dot.as_wire_str(), "Dot");
    }

    #[tokio::test]
    async fn ensure_collection_against_an_unreachable_host_is_a_connection_error() {
        let client = QdrantClient::new(VectorStoreConfig {
            base_url: "http://127.0.0.1:1".to_string(),
        });
        let err = client
            .ensure_collection("positions", 1536, Distance::Cosine)
            .await
            .unwrap_err();
        assert!(matches!(err, VectorStoreError::Connection(_)));
    }
}
