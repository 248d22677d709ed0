use thiserror::Error;

/// Errors surfaced by a single iteration of the worker loop. None of
/// these terminate the process; the loop logs and continues.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("repository error: {0}")]
    Repository(#[from] chessmate_repository::RepositoryError),

    #[error("embedding provider error: {0}")]
    Embedder(#[from] chessmate_embedder::EmbedderError),

    #[error("vector store error: {0}")]
    VectorStore(#[from] chessmate_vector::VectorStoreError),

    #[error("fen error: {0}")]
    Fen(#[from] chessmate_fen::FenError),
}
