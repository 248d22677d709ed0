use std::env;
use std::time::Duration;

const DEFAULT_CLAIM_LIMIT: i64 = 16;
const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
const DEFAULT_COLLECTION: &str = "positions";
const DEFAULT_VECTOR_SIZE: u64 = 1536;

/// Runtime configuration for the embedding worker loop, read from
/// environment variables with typed defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerConfig {
    pub claim_limit: i64,
    pub poll_interval: Duration,
    pub collection_name: String,
    pub vector_size: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            claim_limit: DEFAULT_CLAIM_LIMIT,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            collection_name: DEFAULT_COLLECTION.to_string(),
            vector_size: DEFAULT_VECTOR_SIZE,
        }
    }
}

impl WorkerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("CHESSMATE_WORKER_CLAIM_LIMIT") {
            if let Ok(limit) = raw.parse() {
                config.claim_limit = limit;
            }
        }

        if let Ok(raw) = env::var("CHESSMATE_WORKER_POLL_INTERVAL_MS") {
            if let Ok(ms) = raw.parse() {
                config.poll_interval = Duration::from_millis(ms);
            }
        }

        if let Ok(name) = env::var("CHESSMATE_VECTOR_COLLECTION") {
            config.collection_name = name;
        }

        if let Ok(raw) = env::var("CHESSMATE_VECTOR_SIZE") {
            if let Ok(size) = raw.parse() {
                config.vector_size = size;
            }
        }

        config
    }
}
