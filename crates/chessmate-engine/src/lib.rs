//! Deterministic SAN-to-FEN chess position replay.
//!
//! A mutable internal board state machine that replays a
//! sequence of Standard Algebraic Notation moves from the standard
//! starting position and emits one canonical FEN per ply, handling
//! disambiguation, en passant, castling, promotion, and castling-rights
//! maintenance. The board and move-resolution machinery are private;
//! the only public surface is [`replay_moves`] and [`fen_after_move`].

mod apply;
mod board;
mod error;
mod piece;
mod resolve;
mod san;
mod square;
mod state;

mod replay;

pub use error::EngineError;
pub use replay::{fen_after_move, replay_moves};
