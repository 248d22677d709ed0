//! In-memory [`Repository`] implementation used by the claim/complete/fail
//! state machine tests and by [`chessmate_worker`](../chessmate_worker)'s
//! own unit tests, so neither needs a live Postgres instance.

use std::sync::Mutex;

use chrono::Utc;
use chessmate_engine::replay_moves;

use crate::error::RepositoryError;
use crate::filters::{build_conditions, FieldFilter, FilterParam, RatingFilter};
use crate::model::{
    EmbeddingJob, GameSummary, GameWithPgn, JobStatus, NewGame, PlayerRecord, PositionRecord,
    VectorPayload,
};
use crate::repository::Repository;

#[derive(Debug, Clone)]
struct GameRow {
    id: i64,
    white_player_id: i64,
    black_player_id: i64,
    event: Option<String>,
    result: Option<String>,
    opening_name: Option<String>,
    opening_slug: Option<String>,
    eco_code: Option<String>,
    played_on: Option<String>,
    pgn: String,
}

#[derive(Default)]
struct State {
    players: Vec<PlayerRecord>,
    games: Vec<GameRow>,
    positions: Vec<PositionRecord>,
    jobs: Vec<EmbeddingJob>,
    next_player_id: i64,
    next_game_id: i64,
    next_position_id: i64,
    next_job_id: i64,
}

impl State {
    fn new() -> Self {
        Self {
            next_player_id: 1,
            next_game_id: 1,
            next_position_id: 1,
            next_job_id: 1,
            ..Self::default()
        }
    }

    fn upsert_player(&mut self, name: &str, fide_id: Option<&str>, rating: Option<i32>) -> i64 {
        if let Some(fide_id) = fide_id {
            if let Some(existing) = self.players.iter_mut().find(|p| p.fide_id.as_deref() == Some(fide_id)) {
                existing.rating_peak = rating.max(existing.rating_peak);
                return existing.id;
            }
        } else if let Some(existing) = self
            .players
            .iter_mut()
            .find(|p| p.fide_id.is_none() && p.name == name)
        {
            existing.rating_peak = rating.max(existing.rating_peak);
            return existing.id;
        }

        let id = self.next_player_id;
        self.next_player_id += 1;
        self.players.push(PlayerRecord {
            id,
            name: name.to_string(),
            fide_id: fide_id.map(str::to_string),
            rating_peak: rating,
        });
        id
    }
}

/// A purely in-memory [`Repository`] guarded by a single mutex. Mirrors the
/// structure of [`card_store::memory::InMemoryCardStore`]: no concurrency
/// control beyond the mutex, adequate for unit tests, never used in
/// production.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("in-memory repository mutex poisoned")
    }
}

impl Repository for InMemoryRepository {
    async fn insert_game(&self, new_game: &NewGame) -> Result<(i64, usize), RepositoryError> {
        let sans: Vec<&str> = new_game.sans.iter().map(String::as_str).collect();
        let fens = replay_moves(&sans)?;

        let mut state = self.lock();
        let white_id = state.upsert_player(
            &new_game.metadata.white.name,
            new_game.metadata.white.fide_id.as_deref(),
            new_game.metadata.white.rating,
        );
        let black_id = state.upsert_player(
            &new_game.metadata.black.name,
            new_game.metadata.black.fide_id.as_deref(),
            new_game.metadata.black.rating,
        );

        let game_id = state.next_game_id;
        state.next_game_id += 1;
        state.games.push(GameRow {
            id: game_id,
            white_player_id: white_id,
            black_player_id: black_id,
            event: new_game.metadata.event.clone(),
            result: new_game.metadata.result.clone(),
            opening_name: new_game.metadata.opening_name.clone(),
            opening_slug: new_game.metadata.opening_slug.clone(),
            eco_code: new_game.metadata.eco_code.clone(),
            played_on: new_game.metadata.date.clone(),
            pgn: new_game.pgn.clone(),
        });

        let n_positions = fens.len();
        for (offset, fen) in fens.iter().enumerate() {
            let ply = (offset + 1) as i32;
            let move_number = (ply + 1) / 2;
            let side_to_move = if offset % 2 == 0 { "w" } else { "b" };
            let position_id = state.next_position_id;
            state.next_position_id += 1;
            state.positions.push(PositionRecord {
                id: position_id,
                game_id,
                ply,
                move_number,
                side_to_move: side_to_move.to_string(),
                fen: fen.to_string(),
                san: new_game.sans[offset].clone(),
                vector_id: None,
            });

            let job_id = state.next_job_id;
            state.next_job_id += 1;
            state.jobs.push(EmbeddingJob {
                id: job_id,
                position_id,
                game_id,
                fen: fen.to_string(),
                status: JobStatus::Pending,
                attempts: 0,
                last_error: None,
                enqueued_at: Utc::now(),
                started_at: None,
                completed_at: None,
            });
        }

        Ok((game_id, n_positions))
    }

    async fn search_games(
        &self,
        filters: &[FieldFilter],
        rating: &RatingFilter,
        limit: i64,
    ) -> Result<Vec<GameSummary>, RepositoryError> {
        // The in-memory backend still routes through `build_conditions` so
        // whitelist/parameter-normalization behavior is exercised the same
        // way it would be against Postgres, then re-applies the normalized
        // filters as plain predicates over the in-memory rows.
        let (_conditions, params, _next) = build_conditions(filters, rating, 1);
        let normalized_text_params: Vec<&str> = params
            .iter()
            .filter_map(|p| match p {
                FilterParam::Text(s) => Some(s.as_str()),
                FilterParam::Int(_) => None,
            })
            .collect();

        let state = self.lock();
        let mut matched: Vec<GameSummary> = Vec::new();
        for game in &state.games {
            if !normalized_text_params.is_empty() {
                let haystack = [
                    game.opening_slug.as_deref().unwrap_or(""),
                    game.eco_code.as_deref().unwrap_or(""),
                ]
                .join(" ")
                .to_lowercase();
                let white = state
                    .players
                    .iter()
                    .find(|p| p.id == game.white_player_id)
                    .map(|p| p.name.to_lowercase())
                    .unwrap_or_default();
                let black = state
                    .players
                    .iter()
                    .find(|p| p.id == game.black_player_id)
                    .map(|p| p.name.to_lowercase())
                    .unwrap_or_default();
                let event = game.event.as_deref().unwrap_or_default().to_lowercase();
                let ok = normalized_text_params.iter().all(|needle| {
                    haystack.contains(needle)
                        || white.contains(needle)
                        || black.contains(needle)
                        || event.contains(needle)
                });
                if !ok {
                    continue;
                }
            }

            let white = state.players.iter().find(|p| p.id == game.white_player_id);
            let black = state.players.iter().find(|p| p.id == game.black_player_id);

            if let Some(min) = rating.white_min {
                if white.and_then(|p| p.rating_peak).unwrap_or(i32::MIN) < min {
                    continue;
                }
            }
            if let Some(min) = rating.black_min {
                if black.and_then(|p| p.rating_peak).unwrap_or(i32::MIN) < min {
                    continue;
                }
            }
            if let Some(delta) = rating.max_rating_delta {
                match (white.and_then(|p| p.rating_peak), black.and_then(|p| p.rating_peak)) {
                    (Some(w), Some(b)) if (w - b).abs() <= delta => {}
                    _ => continue,
                }
            }

            matched.push(GameSummary {
                id: game.id,
                white_name: white.map(|p| p.name.clone()).unwrap_or_default(),
                black_name: black.map(|p| p.name.clone()).unwrap_or_default(),
                white_rating: white.and_then(|p| p.rating_peak),
                black_rating: black.and_then(|p| p.rating_peak),
                event: game.event.clone(),
                result: game.result.clone(),
                opening_name: game.opening_name.clone(),
                opening_slug: game.opening_slug.clone(),
                eco_code: game.eco_code.clone(),
                played_on: game.played_on.clone(),
            });
            if matched.len() as i64 >= limit {
                break;
            }
        }
        Ok(matched)
    }

    async fn pending_embedding_job_count(&self) -> Result<i64, RepositoryError> {
        let state = self.lock();
        Ok(state
            .jobs
            .iter()
            .filter(|j| j.status == JobStatus::Pending)
            .count() as i64)
    }

    async fn fetch_games_with_pgn(&self, ids: &[i64]) -> Result<Vec<GameWithPgn>, RepositoryError> {
        let state = self.lock();
        Ok(state
            .games
            .iter()
            .filter(|g| ids.contains(&g.id))
            .map(|g| GameWithPgn {
                id: g.id,
                pgn: g.pgn.clone(),
            })
            .collect())
    }

    async fn claim_pending_jobs(&self, limit: i64) -> Result<Vec<EmbeddingJob>, RepositoryError> {
        let mut state = self.lock();
        let mut pending_indices: Vec<usize> = state
            .jobs
            .iter()
            .enumerate()
            .filter(|(_, j)| j.status == JobStatus::Pending)
            .map(|(i, _)| i)
            .collect();
        pending_indices.sort_by_key(|&i| state.jobs[i].enqueued_at);
        pending_indices.truncate(limit.max(0) as usize);

        let now = Utc::now();
        let mut claimed = Vec::with_capacity(pending_indices.len());
        for idx in pending_indices {
            let job = &mut state.jobs[idx];
            job.status = JobStatus::InProgress;
            job.attempts += 1;
            job.started_at = Some(now);
            claimed.push(job.clone());
        }
        Ok(claimed)
    }

    async fn mark_job_completed(&self, job_id: i64, vector_id: &str) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if let Some(job) = state.jobs.iter_mut().find(|j| j.id == job_id) {
            if job.status == JobStatus::InProgress {
                job.status = JobStatus::Completed;
                job.completed_at = Some(Utc::now());
                let position_id = job.position_id;
                let vector_id = vector_id.to_string();
                if let Some(position) = state.positions.iter_mut().find(|p| p.id == position_id) {
                    position.vector_id = Some(vector_id);
                }
            }
        }
        Ok(())
    }

    async fn mark_job_failed(&self, job_id: i64, error: &str) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if let Some(job) = state.jobs.iter_mut().find(|j| j.id == job_id) {
            if job.status == JobStatus::InProgress {
                job.status = JobStatus::Failed;
                job.last_error = Some(error.to_string());
                job.completed_at = Some(Utc::now());
            }
        }
        Ok(())
    }

    async fn vector_payload_for_job(&self, job_id: i64) -> Result<VectorPayload, RepositoryError> {
        let state = self.lock();
        let job = state
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .ok_or(RepositoryError::JobNotFound(job_id))?;
        let game = state
            .games
            .iter()
            .find(|g| g.id == job.game_id)
            .ok_or(RepositoryError::JobNotFound(job_id))?;
        let white = state
            .players
            .iter()
            .find(|p| p.id == game.white_player_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let black = state
            .players
            .iter()
            .find(|p| p.id == game.black_player_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        Ok(VectorPayload {
            position_id: job.position_id,
            game_id: job.game_id,
            fen: job.fen.clone(),
            white,
            black,
            opening_slug: game.opening_slug.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmate_metadata::{GameMetadata, PlayerInfo};

    fn sample_new_game() -> NewGame {
        NewGame {
            metadata: GameMetadata {
                white: PlayerInfo {
                    name: "Carlsen, Magnus".to_string(),
                    ..PlayerInfo::default()
                },
                black: PlayerInfo {
                    name: "Nepomniachtchi, Ian".to_string(),
                    ..PlayerInfo::default()
                },
                opening_slug: Some("sicilian_defense".to_string()),
                ..GameMetadata::default()
            },
            pgn: "1. e4 c5 *".to_string(),
            sans: vec!["e4".to_string(), "c5".to_string()],
        }
    }

    #[tokio::test]
    async fn insert_game_creates_one_pending_job_per_position() {
        let repo = InMemoryRepository::new();
        let (game_id, n_positions) = repo.insert_game(&sample_new_game()).await.unwrap();
        assert_eq!(game_id, 1);
        assert_eq!(n_positions, 2);
        assert_eq!(repo.pending_embedding_job_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn claim_pending_jobs_transitions_status_and_increments_attempts() {
        let repo = InMemoryRepository::new();
        repo.insert_game(&sample_new_game()).await.unwrap();
        let claimed = repo.claim_pending_jobs(10).await.unwrap();
        assert_eq!(claimed.len(), 2);
        assert!(claimed.iter().all(|j| j.attempts == 1));
        assert_eq!(repo.pending_embedding_job_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn claim_pending_jobs_never_double_claims_across_callers() {
        let repo = InMemoryRepository::new();
        repo.insert_game(&sample_new_game()).await.unwrap();
        let first = repo.claim_pending_jobs(10).await.unwrap();
        let second = repo.claim_pending_jobs(10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn mark_job_completed_twice_is_idempotent() {
        let repo = InMemoryRepository::new();
        repo.insert_game(&sample_new_game()).await.unwrap();
        let claimed = repo.claim_pending_jobs(1).await.unwrap();
        let job_id = claimed[0].id;
        repo.mark_job_completed(job_id, "abc123").await.unwrap();
        repo.mark_job_completed(job_id, "def456").await.unwrap();
        let payload = repo.vector_payload_for_job(job_id).await.unwrap();
        assert_eq!(payload.fen, claimed[0].fen);
    }

    #[tokio::test]
    async fn mark_job_failed_on_non_in_progress_row_is_a_no_op() {
        let repo = InMemoryRepository::new();
        repo.insert_game(&sample_new_game()).await.unwrap();
        // Job is still Pending, never claimed.
        repo.mark_job_failed(1, "boom").await.unwrap();
        assert_eq!(repo.pending_embedding_job_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn search_games_filters_by_opening_slug() {
        let repo = InMemoryRepository::new();
        repo.insert_game(&sample_new_game()).await.unwrap();
        let filters = [FieldFilter::new("opening", "Sicilian")];
        let results = repo
            .search_games(&filters, &RatingFilter::default(), 10)
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].white_name, "Carlsen, Magnus");
    }

    #[tokio::test]
    async fn vector_payload_for_unknown_job_is_an_error() {
        let repo = InMemoryRepository::new();
        let err = repo.vector_payload_for_job(999).await.unwrap_err();
        assert!(matches!(err, RepositoryError::JobNotFound(999)));
    }
}
