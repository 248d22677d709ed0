use std::sync::Arc;

use anyhow::Context;
use chessmate_embedder::{EmbedderConfig, OpenAiEmbeddingClient};
use chessmate_repository::{ConnectionPool, PgRepository, RepositoryConfig};
use chessmate_vector::{QdrantClient, VectorStoreConfig};
use chessmate_worker::WorkerConfig;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let repo_config = RepositoryConfig::from_env().context("loading repository configuration")?;
    let embedder_config = EmbedderConfig::from_env().context("loading embedding provider configuration")?;
    let vector_config = VectorStoreConfig::from_env().context("loading vector store configuration")?;
    let worker_config = WorkerConfig::from_env();

    let pool = ConnectionPool::connect(&repo_config).await.context("connecting to the relational database")?;
    let repository = Arc::new(PgRepository::new(pool));
    let embedder = Arc::new(OpenAiEmbeddingClient::new(embedder_config));
    let vector_store = Arc::new(QdrantClient::new(vector_config));

    let shutdown = CancellationToken::new();
    let shutdown_signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received shutdown signal");
            shutdown_signal.cancel();
        }
    });

    info!(claim_limit = worker_config.claim_limit, poll_interval_ms = worker_config.poll_interval.as_millis() as u64, "starting embedding worker");
    chessmate_worker::run(repository, embedder, vector_store, worker_config, shutdown).await;

    info!("worker exited cleanly");
    Ok(())
}
