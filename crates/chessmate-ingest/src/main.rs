mod cli;

use std::fs;
use std::sync::Arc;

use anyhow::Context;
use chessmate_pgn::stream_games;
use chessmate_repository::{ConnectionPool, NewGame, PgRepository, Repository, RepositoryConfig};
use clap::Parser;
use cli::Cli;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let repo_config = RepositoryConfig::from_env().context("loading repository configuration")?;
    let pool = ConnectionPool::connect(&repo_config).await.context("connecting to the relational database")?;
    let repository = Arc::new(PgRepository::new(pool));

    let mut total_games = 0usize;
    let mut total_positions = 0usize;
    let mut total_errors = 0usize;

    for path in &cli.inputs {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading PGN file {}", path.display()))?;

        let (games, positions, errors) = ingest_document(repository.as_ref(), &raw, cli.skip_errors).await?;
        info!(file = %path.display(), games, positions, errors, "ingested PGN file");
        total_games += games;
        total_positions += positions;
        total_errors += errors;
    }

    info!(total_games, total_positions, total_errors, "ingestion complete");
    Ok(())
}

/// Walks every game in `raw` via [`stream_games`], persisting each one in
/// turn. The stream yields between games, so a caller embedding this in a
/// larger async binary can interleave other I/O between iterations.
async fn ingest_document<R: Repository>(
    repository: &R,
    raw: &str,
    skip_errors: bool,
) -> anyhow::Result<(usize, usize, usize)> {
    let mut games = 0usize;
    let mut positions = 0usize;
    let mut errors = 0usize;

    for (index, raw_game, parsed) in stream_games(raw) {
        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                errors += 1;
                warn!(game_index = index, %err, "failed to parse game");
                if skip_errors {
                    continue;
                }
                return Err(err.into());
            }
        };

        match persist_one(repository, raw_game, &parsed).await {
            Ok(n) => {
                games += 1;
                positions += n;
            }
            Err(err) => {
                errors += 1;
                warn!(game_index = index, %err, "failed to build or persist game record");
                if !skip_errors {
                    return Err(err);
                }
            }
        }
    }

    Ok((games, positions, errors))
}

async fn persist_one<R: Repository>(
    repository: &R,
    raw: &str,
    parsed: &chessmate_pgn::PgnGame,
) -> anyhow::Result<usize> {
    let metadata = chessmate_metadata::extract(parsed);
    let sans = parsed.san_tokens().into_iter().map(str::to_string).collect();

    let new_game = NewGame {
        metadata,
        pgn: raw.to_string(),
        sans,
    };

    let (_game_id, n_positions) = repository
        .insert_game(&new_game)
        .await
        .context("persisting game")?;

    Ok(n_positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmate_repository::InMemoryRepository;
    use std::io::Write;

    const TWO_GAMES: &str = concat!(
        "[Event \"Test Open\"]\n[White \"Alice\"]\n[Black \"Bob\"]\n[Result \"1-0\"]\n\n",
        "1. e4 e5 2. Nf3 Nc6 1-0\n\n",
        "[Event \"Test Open\"]\n[White \"Carol\"]\n[Black \"Dave\"]\n[Result \"0-1\"]\n\n",
        "1. d4 d5 0-1\n",
    );

    #[tokio::test]
    async fn ingest_document_persists_every_well_formed_game() {
        let repository = InMemoryRepository::new();
        let (games, positions, errors) = ingest_document(&repository, TWO_GAMES, false).await.unwrap();
        assert_eq!(games, 2);
        assert_eq!(positions, 4 + 2);
        assert_eq!(errors, 0);
    }

    #[tokio::test]
    async fn ingest_document_reads_the_file_written_to_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_GAMES.as_bytes()).unwrap();
        let raw = fs::read_to_string(file.path()).unwrap();

        let repository = InMemoryRepository::new();
        let (games, _positions, errors) = ingest_document(&repository, &raw, false).await.unwrap();
        assert_eq!(games, 2);
        assert_eq!(errors, 0);
    }

    #[tokio::test]
    async fn skip_errors_continues_past_a_malformed_game_and_counts_it() {
        let pgn = concat!(
            "[Event \"Good\"]\n[Result \"1-0\"]\n\n1. e4 e5 1-0\n\n",
            "[Event \"Bad\"]\n[Result \"*\"]\n\n1. Zz9 *\n",
        );
        let repository = InMemoryRepository::new();
        let (games, positions, errors) = ingest_document(&repository, pgn, true).await.unwrap();
        assert_eq!(games, 1);
        assert_eq!(positions, 2);
        assert_eq!(errors, 1);
    }

    #[tokio::test]
    async fn without_skip_errors_a_malformed_game_aborts_the_whole_run() {
        let pgn = concat!(
            "[Event \"Good\"]\n[Result \"1-0\"]\n\n1. e4 e5 1-0\n\n",
            "[Event \"Bad\"]\n[Result \"*\"]\n\n1. Zz9 *\n",
        );
        let repository = InMemoryRepository::new();
        let result = ingest_document(&repository, pgn, false).await;
        assert!(result.is_err(), "expected the run to abort on the malformed game");
        assert_eq!(
            repository.pending_embedding_job_count().await.unwrap(),
            2,
            "the already-persisted leading game should not be rolled back"
        );
    }
}
