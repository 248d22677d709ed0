use std::sync::Arc;

use chessmate_embedder::EmbeddingClient;
use chessmate_fen::Fen;
use chessmate_repository::{JobStatus, Repository};
use chessmate_vector::{Distance, VectorPoint, VectorStore};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::WorkerConfig;
use crate::error::WorkerError;

/// Runs the embedding worker loop until `shutdown` is cancelled.
///
/// Each iteration claims up to `config.claim_limit` pending jobs, embeds
/// and upserts each one, and marks it completed or failed. An empty claim
/// sleeps for `config.poll_interval` before retrying. The loop never
/// panics on data or transport errors; it logs and continues.
pub async fn run<R, E, V>(
    repository: Arc<R>,
    embedder: Arc<E>,
    vector_store: Arc<V>,
    config: WorkerConfig,
    shutdown: CancellationToken,
) where
    R: Repository,
    E: EmbeddingClient,
    V: VectorStore,
{
    if let Err(err) = vector_store
        .ensure_collection(&config.collection_name, config.vector_size, Distance::Cosine)
        .await
    {
        error!(%err, "failed to ensure vector collection exists; continuing anyway");
    }

    loop {
        if shutdown.is_cancelled() {
            info!("shutdown requested, exiting worker loop");
            return;
        }

        let jobs = match repository.claim_pending_jobs(config.claim_limit).await {
            Ok(jobs) => jobs,
            Err(err) => {
                error!(%err, "claim_pending_jobs failed, sleeping before retry");
                sleep_or_shutdown(config.poll_interval, &shutdown).await;
                continue;
            }
        };

        if jobs.is_empty() {
            sleep_or_shutdown(config.poll_interval, &shutdown).await;
            continue;
        }

        for job in jobs {
            if let Err(err) = process_job(
                repository.as_ref(),
                embedder.as_ref(),
                vector_store.as_ref(),
                &config,
                job.id,
                &job.fen,
            )
            .await
            {
                warn!(job_id = job.id, %err, "job failed");
            }
        }
    }
}

async fn sleep_or_shutdown(duration: std::time::Duration, shutdown: &CancellationToken) {
    tokio::select! {
        () = tokio::time::sleep(duration) => {}
        () = shutdown.cancelled() => {}
    }
}

async fn process_job<R, E, V>(
    repository: &R,
    embedder: &E,
    vector_store: &V,
    config: &WorkerConfig,
    job_id: i64,
    fen: &str,
) -> Result<(), WorkerError>
where
    R: Repository,
    E: EmbeddingClient,
    V: VectorStore,
{
    let embed_result = embed_and_upsert(repository, embedder, vector_store, config, job_id, fen).await;

    match embed_result {
        Ok(vector_id) => {
            repository.mark_job_completed(job_id, &vector_id).await?;
            Ok(())
        }
        Err(err) => {
            let sanitized = err.to_string();
            repository.mark_job_failed(job_id, &sanitized).await?;
            Err(err)
        }
    }
}

async fn embed_and_upsert<R, E, V>(
    repository: &R,
    embedder: &E,
    vector_store: &V,
    config: &WorkerConfig,
    job_id: i64,
    fen: &str,
) -> Result<String, WorkerError>
where
    R: Repository,
    E: EmbeddingClient,
    V: VectorStore,
{
    let parsed_fen = Fen::normalize(fen)?;
    let vector_id = chessmate_fen::hash(&parsed_fen);

    let mut vectors = embedder.embed_batch(std::slice::from_ref(&fen.to_string())).await?;
    let vector = vectors.pop().ok_or(chessmate_embedder::EmbedderError::MissingEmbedding { index: 0 })?;

    let payload = repository.vector_payload_for_job(job_id).await?;
    let point = VectorPoint { id: vector_id.clone(), vector, payload: serde_json::to_value(&payload).unwrap_or_default() };

    vector_store.upsert_points(&config.collection_name, std::slice::from_ref(&point)).await?;

    Ok(vector_id)
}
