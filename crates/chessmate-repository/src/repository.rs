use crate::error::RepositoryError;
use crate::filters::{FieldFilter, RatingFilter};
use crate::model::{EmbeddingJob, GameSummary, GameWithPgn, NewGame, VectorPayload};

/// Persistence contract for the ingestion pipeline and its embedding
/// job queue. Implemented by [`crate::pg::PgRepository`] against Postgres
/// and by [`crate::memory::InMemoryRepository`] for unit tests that need
/// the claim/complete/fail state machine without a live database.
pub trait Repository: Send + Sync {
    /// Persists a game, its per-ply positions, and one `Pending`
    /// embedding job per position, inside a single transaction. Returns
    /// the new game id and the number of positions inserted.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] and rolls back entirely if any step
    /// fails (player upsert, game insert, position bulk-insert, or job
    /// enqueue).
    fn insert_game(
        &self,
        new_game: &NewGame,
    ) -> impl Future<Output = Result<(i64, usize), RepositoryError>> + Send;

    /// Builds and runs a whitelisted metadata/rating filter query,
    /// read-only.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the query fails.
    fn search_games(
        &self,
        filters: &[FieldFilter],
        rating: &RatingFilter,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<GameSummary>, RepositoryError>> + Send;

    /// Counts embedding jobs still in `Pending` status.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the query fails.
    fn pending_embedding_job_count(&self) -> impl Future<Output = Result<i64, RepositoryError>> + Send;

    /// Fetches the raw PGN text for a set of game ids.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the query fails.
    fn fetch_games_with_pgn(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<Vec<GameWithPgn>, RepositoryError>> + Send;

    /// Atomically selects up to `limit` `Pending` jobs ordered oldest
    /// first and transitions them to `InProgress`, incrementing
    /// `attempts` and setting `started_at`. Safe under concurrent
    /// workers: no two callers may observe the same row.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the claim query fails.
    fn claim_pending_jobs(
        &self,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<EmbeddingJob>, RepositoryError>> + Send;

    /// Transitions a job to `Completed` with the given vector id.
    /// Idempotent: applying this twice, or to a job not currently
    /// `InProgress`, is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the update query fails.
    fn mark_job_completed(
        &self,
        job_id: i64,
        vector_id: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Transitions a job to `Failed` with a sanitized error message.
    /// Idempotent in the same sense as [`Repository::mark_job_completed`].
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the update query fails.
    fn mark_job_failed(
        &self,
        job_id: i64,
        error: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Builds the payload to store alongside a job's vector once it is
    /// upserted.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::JobNotFound`] if the job, its position,
    /// or its game cannot be found, or a driver error otherwise.
    fn vector_payload_for_job(
        &self,
        job_id: i64,
    ) -> impl Future<Output = Result<VectorPayload, RepositoryError>> + Send;
}
