use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point to upsert into the vector store: a stable id, its embedding,
/// and an arbitrary JSON payload stored alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// A single result row from [`crate::client::vector_search`]: a point plus
/// its similarity score and, if requested, its payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// A single `field = value` equality filter applied to a vector search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub field: String,
    pub value: String,
}

/// Distance metric used by a collection, mirrored onto the wire as its
/// lowercase name (`cosine`, `euclidean`, `dot`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Cosine,
    Euclidean,
    Dot,
}

impl Distance {
    #[must_use]
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Distance::Cosine => "Cosine",
            Distance::Euclidean => "Euclid",
            Distance::Dot => "Dot",
        }
    }
}
