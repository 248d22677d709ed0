use chessmate_fen::{CastlingRights, Color, Fen};

use crate::board::Board;
use crate::square::Square;

/// The full mutable position used internally by the replay engine. Not
/// exposed outside the crate; consumers only ever see the [`Fen`] emitted
/// after each ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove: u32,
    pub fullmove: u32,
}

impl GameState {
    #[must_use]
    pub fn initial() -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Color::White,
            castling: CastlingRights::parse("KQkq").expect("KQkq is always valid"),
            en_passant: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    #[must_use]
    pub fn to_fen(&self) -> Fen {
        Fen::from_parts(
            self.board.to_placement(),
            self.side_to_move,
            self.castling,
            self.en_passant.map(Square::to_algebraic),
            self.halfmove,
            self.fullmove,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_emits_the_standard_start_fen() {
        let fen = GameState::initial().to_fen();
        assert_eq!(
            fen.to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
    }
}
