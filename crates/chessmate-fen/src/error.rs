use thiserror::Error;

/// Errors raised while validating or normalizing a FEN string.
///
/// Every variant corresponds to a single structural or chess-legality
/// constraint from the FEN invariants. Callers
/// that only care whether a FEN is valid can match on the variant;
/// callers that want a user-facing message can rely on `Display`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must not be empty")]
    Empty,

    #[error("FEN must contain exactly 6 fields, found {found}")]
    FieldCount { found: usize },

    #[error("FEN piece placement must contain exactly 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("FEN rank {rank} contains an unrecognized character '{ch}'")]
    InvalidRankChar { rank: usize, ch: char },

    #[error("FEN rank {rank} has a digit run that is not between 1 and 8, or two adjacent digits")]
    InvalidDigitRun { rank: usize },

    #[error("FEN rank {rank} does not sum to 8 squares (sums to {sum})")]
    RankNotEight { rank: usize, sum: u32 },

    #[error("FEN must contain exactly one white king and one black king")]
    KingCount,

    #[error("FEN must contain at most 8 {color} pawns")]
    TooManyPawns { color: &'static str },

    #[error("FEN must not place a pawn on rank 1 or rank 8")]
    PawnOnBackRank,

    #[error("FEN active color must be 'w' or 'b', found '{found}'")]
    InvalidActiveColor { found: String },

    #[error("FEN castling rights must be '-' or a subset of KQkq without duplicates, found '{found}'")]
    InvalidCastling { found: String },

    #[error("FEN en passant square must be '-' or a valid algebraic square, found '{found}'")]
    InvalidEnPassant { found: String },

    #[error("FEN en passant rank must be 6 when active color is white and 3 when active color is black")]
    EnPassantRankMismatch,

    #[error("FEN halfmove clock must be a non-negative integer, found '{found}'")]
    InvalidHalfmove { found: String },

    #[error("FEN fullmove number must be a positive integer, found '{found}'")]
    InvalidFullmove { found: String },
}
