//! Ingestion repository, embedding job queue, and query-filter builder.
//!
//! Persists games/positions/embedding jobs, claims/completes/fails jobs,
//! tracks pool stats, and builds whitelisted metadata filter queries.
//! [`Repository`] is the persistence contract; [`pg::PgRepository`]
//! satisfies it against a live Postgres database and
//! [`memory::InMemoryRepository`] satisfies it in-process for unit tests
//! that exercise the claim/complete/fail state machine without a
//! database.

mod config;
mod error;
mod filters;
mod memory;
mod model;
mod pg;
mod pool;
mod repository;

pub use config::RepositoryConfig;
pub use error::{sanitize_db_error, RepositoryError};
pub use filters::{build_conditions, FieldFilter, FilterParam, RatingFilter};
pub use memory::InMemoryRepository;
pub use model::{
    EmbeddingJob, GameSummary, GameWithPgn, JobStatus, NewGame, PlayerRecord, PositionRecord,
    VectorPayload,
};
pub use pg::PgRepository;
pub use pool::{ConnectionPool, PoolStats};
pub use repository::Repository;
