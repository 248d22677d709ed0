use chrono::{DateTime, Utc};
use serde::Serialize;

/// A player as recorded in the `players` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub id: i64,
    pub name: String,
    pub fide_id: Option<String>,
    pub rating_peak: Option<i32>,
}

/// A row of the `positions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRecord {
    pub id: i64,
    pub game_id: i64,
    pub ply: i32,
    pub move_number: i32,
    pub side_to_move: String,
    pub fen: String,
    pub san: String,
    pub vector_id: Option<String>,
}

/// Lifecycle status of an [`EmbeddingJob`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl JobStatus {
    #[must_use]
    pub fn as_db_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(JobStatus::Pending),
            "in_progress" => Some(JobStatus::InProgress),
            "completed" => Some(JobStatus::Completed),
            "failed" => Some(JobStatus::Failed),
            _ => None,
        }
    }
}

/// A row of the `embedding_jobs` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddingJob {
    pub id: i64,
    pub position_id: i64,
    pub game_id: i64,
    pub fen: String,
    pub status: JobStatus,
    pub attempts: i32,
    pub last_error: Option<String>,
    pub enqueued_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Input record for [`crate::repository::Repository::insert_game`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGame {
    pub metadata: chessmate_metadata::GameMetadata,
    pub pgn: String,
    pub sans: Vec<String>,
}

/// A lightweight game projection returned by
/// [`crate::repository::Repository::search_games`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub id: i64,
    pub white_name: String,
    pub black_name: String,
    pub white_rating: Option<i32>,
    pub black_rating: Option<i32>,
    pub event: Option<String>,
    pub result: Option<String>,
    pub opening_name: Option<String>,
    pub opening_slug: Option<String>,
    pub eco_code: Option<String>,
    pub played_on: Option<String>,
}

/// A game row paired with its original PGN text, as returned by
/// [`crate::repository::Repository::fetch_games_with_pgn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameWithPgn {
    pub id: i64,
    pub pgn: String,
}

/// The payload attached to a vector point, derived from the job's
/// position and game rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorPayload {
    pub position_id: i64,
    pub game_id: i64,
    pub fen: String,
    pub white: String,
    pub black: String,
    pub opening_slug: Option<String>,
}
