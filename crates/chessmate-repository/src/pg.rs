//! Postgres-backed [`Repository`] implementation.
//!
//! Queries are issued with the untyped `sqlx::query`/`sqlx::query_as`
//! builders rather than the `query!` compile-time-checked macros, which
//! would require a live database at build time this workspace doesn't
//! have.

use chessmate_engine::replay_moves;
use sqlx::{Connection, Row};

use crate::error::RepositoryError;
use crate::filters::{build_conditions, FieldFilter, FilterParam, RatingFilter};
use crate::model::{EmbeddingJob, GameSummary, GameWithPgn, JobStatus, NewGame, VectorPayload};
use crate::pool::ConnectionPool;
use crate::repository::Repository;

/// Repository implementation backed by a live Postgres pool.
pub struct PgRepository {
    pool: ConnectionPool,
}

impl PgRepository {
    #[must_use]
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }
}

fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    param: &'q FilterParam,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match param {
        FilterParam::Text(s) => query.bind(s),
        FilterParam::Int(i) => query.bind(i),
    }
}

impl Repository for PgRepository {
    async fn insert_game(&self, new_game: &NewGame) -> Result<(i64, usize), RepositoryError> {
        let sans: Vec<&str> = new_game.sans.iter().map(String::as_str).collect();
        let fens = replay_moves(&sans)?;

        self.pool
            .with_connection(|mut conn| async move {
                let mut tx = conn
                    .begin()
                    .await
                    .map_err(RepositoryError::from_driver)?;

                let white_id = upsert_player(
                    &mut tx,
                    &new_game.metadata.white.name,
                    new_game.metadata.white.fide_id.as_deref(),
                    new_game.metadata.white.rating,
                )
                .await?;
                let black_id = upsert_player(
                    &mut tx,
                    &new_game.metadata.black.name,
                    new_game.metadata.black.fide_id.as_deref(),
                    new_game.metadata.black.rating,
                )
                .await?;

                let game_id: i64 = sqlx::query_scalar(
                    r#"INSERT INTO games
                        (white_player_id, black_player_id, event, site, round, played_on,
                         eco_code, result, white_rating, black_rating, opening_name,
                         opening_slug, pgn)
                       VALUES ($1, $2, $3, $4, $5, $6::date, $7, $8, $9, $10, $11, $12, $13)
                       RETURNING id"#,
                )
                .bind(white_id)
                .bind(black_id)
                .bind(&new_game.metadata.event)
                .bind(&new_game.metadata.site)
                .bind(&new_game.metadata.round)
                .bind(&new_game.metadata.date)
                .bind(&new_game.metadata.eco_code)
                .bind(&new_game.metadata.result)
                .bind(new_game.metadata.white.rating)
                .bind(new_game.metadata.black.rating)
                .bind(&new_game.metadata.opening_name)
                .bind(&new_game.metadata.opening_slug)
                .bind(&new_game.pgn)
                .fetch_one(&mut *tx)
                .await
                .map_err(RepositoryError::from_driver)?;

                for (offset, fen) in fens.iter().enumerate() {
                    let ply = (offset + 1) as i32;
                    let move_number = (ply + 1) / 2;
                    let side_to_move = if offset % 2 == 0 { "w" } else { "b" };

                    let position_id: i64 = sqlx::query_scalar(
                        r#"INSERT INTO positions
                            (game_id, ply, move_number, side_to_move, fen, san)
                           VALUES ($1, $2, $3, $4, $5, $6)
                           RETURNING id"#,
                    )
                    .bind(game_id)
                    .bind(ply)
                    .bind(move_number)
                    .bind(side_to_move)
                    .bind(fen.to_string())
                    .bind(&new_game.sans[offset])
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(RepositoryError::from_driver)?;

                    sqlx::query(
                        r#"INSERT INTO embedding_jobs (position_id, fen, status)
                           VALUES ($1, $2, 'pending')"#,
                    )
                    .bind(position_id)
                    .bind(fen.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(RepositoryError::from_driver)?;
                }

                tx.commit().await.map_err(RepositoryError::from_driver)?;
                Ok((game_id, fens.len()))
            })
            .await
    }

    async fn search_games(
        &self,
        filters: &[FieldFilter],
        rating: &RatingFilter,
        limit: i64,
    ) -> Result<Vec<GameSummary>, RepositoryError> {
        let (conditions, params, next_index) = build_conditions(filters, rating, 1);

        let mut sql = String::from(
            r#"SELECT g.id, w.name AS white_name, b.name AS black_name,
                      g.white_rating, g.black_rating, g.event, g.result,
                      g.opening_name, g.opening_slug, g.eco_code,
                      g.played_on::text AS played_on
               FROM games g
               JOIN (SELECT id, name, rating_peak AS rating FROM players) w ON w.id = g.white_player_id
               JOIN (SELECT id, name, rating_peak AS rating FROM players) b ON b.id = g.black_player_id"#,
        );
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(&format!(" ORDER BY g.id LIMIT ${next_index}"));

        self.pool
            .with_connection(|mut conn| async move {
                let mut query = sqlx::query(&sql);
                for param in &params {
                    query = bind_param(query, param);
                }
                query = query.bind(limit);

                let rows = query
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(RepositoryError::from_driver)?;

                Ok(rows
                    .into_iter()
                    .map(|row| GameSummary {
                        id: row.get("id"),
                        white_name: row.get("white_name"),
                        black_name: row.get("black_name"),
                        white_rating: row.get("white_rating"),
                        black_rating: row.get("black_rating"),
                        event: row.get("event"),
                        result: row.get("result"),
                        opening_name: row.get("opening_name"),
                        opening_slug: row.get("opening_slug"),
                        eco_code: row.get("eco_code"),
                        played_on: row.get("played_on"),
                    })
                    .collect())
            })
            .await
    }

    async fn pending_embedding_job_count(&self) -> Result<i64, RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM embedding_jobs WHERE status = 'pending'",
                )
                .fetch_one(&mut *conn)
                .await
                .map_err(RepositoryError::from_driver)
            })
            .await
    }

    async fn fetch_games_with_pgn(&self, ids: &[i64]) -> Result<Vec<GameWithPgn>, RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                let rows = sqlx::query("SELECT id, pgn FROM games WHERE id = ANY($1)")
                    .bind(ids)
                    .fetch_all(&mut *conn)
                    .await
                    .map_err(RepositoryError::from_driver)?;
                Ok(rows
                    .into_iter()
                    .map(|row| GameWithPgn {
                        id: row.get("id"),
                        pgn: row.get("pgn"),
                    })
                    .collect())
            })
            .await
    }

    async fn claim_pending_jobs(&self, limit: i64) -> Result<Vec<EmbeddingJob>, RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                let rows = sqlx::query(
                    r#"UPDATE embedding_jobs
                       SET status = 'in_progress', attempts = attempts + 1, started_at = now()
                       WHERE id IN (
                           SELECT id FROM embedding_jobs
                           WHERE status = 'pending'
                           ORDER BY enqueued_at
                           LIMIT $1
                           FOR UPDATE SKIP LOCKED
                       )
                       RETURNING id, position_id,
                                 (SELECT game_id FROM positions p WHERE p.id = embedding_jobs.position_id) AS game_id,
                                 fen, status, attempts, last_error, enqueued_at, started_at, completed_at"#,
                )
                .bind(limit)
                .fetch_all(&mut *conn)
                .await
                .map_err(RepositoryError::from_driver)?;

                rows.into_iter().map(row_to_job).collect()
            })
            .await
    }

    async fn mark_job_completed(&self, job_id: i64, vector_id: &str) -> Result<(), RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                let mut tx = conn.begin().await.map_err(RepositoryError::from_driver)?;
                let position_id: Option<i64> = sqlx::query_scalar(
                    r#"UPDATE embedding_jobs
                       SET status = 'completed', completed_at = now()
                       WHERE id = $1 AND status = 'in_progress'
                       RETURNING position_id"#,
                )
                .bind(job_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(RepositoryError::from_driver)?;

                if let Some(position_id) = position_id {
                    sqlx::query("UPDATE positions SET vector_id = $1 WHERE id = $2")
                        .bind(vector_id)
                        .bind(position_id)
                        .execute(&mut *tx)
                        .await
                        .map_err(RepositoryError::from_driver)?;
                }
                tx.commit().await.map_err(RepositoryError::from_driver)?;
                Ok(())
            })
            .await
    }

    async fn mark_job_failed(&self, job_id: i64, error: &str) -> Result<(), RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                sqlx::query(
                    r#"UPDATE embedding_jobs
                       SET status = 'failed', last_error = $2, completed_at = now()
                       WHERE id = $1 AND status = 'in_progress'"#,
                )
                .bind(job_id)
                .bind(error)
                .execute(&mut *conn)
                .await
                .map_err(RepositoryError::from_driver)?;
                Ok(())
            })
            .await
    }

    async fn vector_payload_for_job(&self, job_id: i64) -> Result<VectorPayload, RepositoryError> {
        self.pool
            .with_connection(|mut conn| async move {
                let row = sqlx::query(
                    r#"SELECT p.id AS position_id, p.game_id, p.fen,
                              w.name AS white, b.name AS black, g.opening_slug
                       FROM embedding_jobs j
                       JOIN positions p ON p.id = j.position_id
                       JOIN games g ON g.id = p.game_id
                       JOIN players w ON w.id = g.white_player_id
                       JOIN players b ON b.id = g.black_player_id
                       WHERE j.id = $1"#,
                )
                .bind(job_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(RepositoryError::from_driver)?
                .ok_or(RepositoryError::JobNotFound(job_id))?;

                Ok(VectorPayload {
                    position_id: row.get("position_id"),
                    game_id: row.get("game_id"),
                    fen: row.get("fen"),
                    white: row.get("white"),
                    black: row.get("black"),
                    opening_slug: row.get("opening_slug"),
                })
            })
            .await
    }
}

async fn upsert_player(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    name: &str,
    fide_id: Option<&str>,
    rating: Option<i32>,
) -> Result<i64, RepositoryError> {
    if let Some(fide_id) = fide_id {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM players WHERE fide_id = $1")
            .bind(fide_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(RepositoryError::from_driver)?;
        if let Some(id) = existing {
            bump_rating_peak(tx, id, rating).await?;
            return Ok(id);
        }
    } else {
        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM players WHERE fide_id IS NULL AND name = $1")
                .bind(name)
                .fetch_optional(&mut **tx)
                .await
                .map_err(RepositoryError::from_driver)?;
        if let Some(id) = existing {
            bump_rating_peak(tx, id, rating).await?;
            return Ok(id);
        }
    }

    sqlx::query_scalar(
        "INSERT INTO players (name, fide_id, rating_peak) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(fide_id)
    .bind(rating)
    .fetch_one(&mut **tx)
    .await
    .map_err(RepositoryError::from_driver)
}

async fn bump_rating_peak(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    player_id: i64,
    rating: Option<i32>,
) -> Result<(), RepositoryError> {
    if let Some(rating) = rating {
        sqlx::query(
            "UPDATE players SET rating_peak = GREATEST(COALESCE(rating_peak, 0), $1) WHERE id = $2",
        )
        .bind(rating)
        .bind(player_id)
        .execute(&mut **tx)
        .await
        .map_err(RepositoryError::from_driver)?;
    }
    Ok(())
}

fn row_to_job(row: sqlx::postgres::PgRow) -> Result<EmbeddingJob, RepositoryError> {
    let status_raw: String = row.get("status");
    let status = JobStatus::parse(&status_raw)
        .ok_or_else(|| RepositoryError::Db(format!("unknown job status '{status_raw}'")))?;
    Ok(EmbeddingJob {
        id: row.get("id"),
        position_id: row.get("position_id"),
        game_id: row.get("game_id"),
        fen: row.get("fen"),
        status,
        attempts: row.get("attempts"),
        last_error: row.get("last_error"),
        enqueued_at: row.get("enqueued_at"),
        started_at: row.get("started_at"),
        completed_at: row.get("completed_at"),
    })
}
