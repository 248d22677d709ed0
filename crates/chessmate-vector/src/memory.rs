use std::collections::HashMap;
use std::sync::Mutex;

use crate::client::{SearchRequest, VectorStore};
use crate::error::VectorStoreError;
use crate::model::{Distance, ScoredPoint, VectorPoint};

struct Collection {
    vector_size: u64,
    distance: Distance,
    points: HashMap<String, VectorPoint>,
}

impl Default for Collection {
    fn default() -> Self {
        Self { vector_size: 0, distance: Distance::Cosine, points: HashMap::new() }
    }
}

/// In-memory [`VectorStore`] fake so the embedding worker and query path
/// can be tested without a running Qdrant instance.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: Mutex<HashMap<String, Collection>>,
}

impl InMemoryVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

impl VectorStore for InMemoryVectorStore {
    async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
        distance: Distance,
    ) -> Result<(), VectorStoreError> {
        let mut collections = self.collections.lock().unwrap();
        collections.entry(name.to_string()).or_insert_with(|| Collection {
            vector_size,
            distance,
            points: HashMap::new(),
        });
        Ok(())
    }

    async fn upsert_points(&self, name: &str, points: &[VectorPoint]) -> Result<(), VectorStoreError> {
        let mut collections = self.collections.lock().unwrap();
        let collection = collections.entry(name.to_string()).or_default();
        for point in points {
            collection.points.insert(point.id.clone(), point.clone());
        }
        Ok(())
    }

    async fn vector_search(
        &self,
        name: &str,
        request: &SearchRequest,
    ) -> Result<Vec<ScoredPoint>, VectorStoreError> {
        let collections = self.collections.lock().unwrap();
        let Some(collection) = collections.get(name) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<ScoredPoint> = collection
            .points
            .values()
            .filter(|point| {
                request.filters.iter().all(|filter| {
                    point
                        .payload
                        .get(&filter.field)
                        .and_then(|v| v.as_str())
                        .is_some_and(|v| v == filter.value)
                })
            })
            .map(|point| ScoredPoint {
                id: point.id.clone(),
                score: cosine_similarity(&request.vector, &point.vector),
                payload: Some(point.payload.clone()),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(request.limit as usize);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn upsert_then_search_returns_the_closest_point_first() {
        let store = InMemoryVectorStore::new();
        store.ensure_collection("positions", 2, Distance::Cosine).await.unwrap();
        store
            .upsert_points(
                "positions",
                &[
                    VectorPoint { id: "a".into(), vector: vec![1.0, 0.0], payload: json!({"opening_slug": "italian"}) },
                    VectorPoint { id: "b".into(), vector: vec![0.0, 1.0], payload: json!({"opening_slug": "sicilian"}) },
                ],
            )
            .await
            .unwrap();

        let results = store
            .vector_search("positions", &SearchRequest { vector: vec![1.0, 0.0], filters: vec![], limit: 1 })
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "a");
    }

    #[tokio::test]
    async fn search_respects_payload_filters() {
        let store = InMemoryVectorStore::new();
        store
            .upsert_points(
                "positions",
                &[
                    VectorPoint { id: "a".into(), vector: vec![1.0, 0.0], payload: json!({"opening_slug": "italian"}) },
                    VectorPoint { id: "b".into(), vector: vec![1.0, 0.0], payload: json!({"opening_slug": "sicilian"}) },
                ],
            )
            .await
            .unwrap();

        let results = store
            .vector_search(
                "positions",
                &SearchRequest {
                    vector: vec![1.0, 0.0],
                    filters: vec![crate::model::SearchFilter { field: "opening_slug".into(), value: "sicilian".into() }],
                    limit: 10,
                },
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "b");
    }

    #[tokio::test]
    async fn search_against_an_unknown_collection_returns_empty() {
        let store = InMemoryVectorStore::new();
        let results = store
            .vector_search("missing", &SearchRequest { vector: vec![1.0], filters: vec![], limit: 10 })
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}
