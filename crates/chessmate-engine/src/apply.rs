use chessmate_fen::Color;

use crate::piece::{Piece, PieceKind};
use crate::resolve::ResolvedMove;
use crate::square::Square;
use crate::state::GameState;

/// Applies a resolved move to `state` in place, updating the board,
/// castling rights, en-passant target, move counters, and side to move.
pub fn apply(state: &mut GameState, mv: &ResolvedMove) {
    let color = state.side_to_move;
    let is_pawn_move = mv.piece.kind == PieceKind::Pawn;
    let is_capture = mv.captured_square.is_some();

    if let Some(captured_square) = mv.captured_square {
        state.board.take(captured_square);
    }

    state.board.take(mv.from);
    let moved_piece = match mv.promotion {
        Some(kind) => Piece::new(color, kind),
        None => mv.piece,
    };
    state.board.set(mv.to, Some(moved_piece));

    if let Some((rook_from, rook_to)) = mv.castle_rook {
        let rook = state.board.take(rook_from);
        state.board.set(rook_to, rook);
    }

    if mv.piece.kind == PieceKind::King {
        clear_castling_for_color(state, color);
    }
    clear_castling_corner(state, mv.from);
    clear_castling_corner(state, mv.to);
    if let Some(captured_square) = mv.captured_square {
        clear_castling_corner(state, captured_square);
    }

    state.en_passant = if is_pawn_move && (i8::from(mv.to.rank()) - i8::from(mv.from.rank())).abs() == 2 {
        let mid_rank = (mv.from.rank() + mv.to.rank()) / 2;
        Some(Square::new(mv.from.file(), mid_rank))
    } else {
        None
    };

    if is_pawn_move || is_capture {
        state.halfmove = 0;
    } else {
        state.halfmove += 1;
    }

    if state.side_to_move == Color::Black {
        state.fullmove += 1;
    }
    state.side_to_move = state.side_to_move.opposite();
}

fn clear_castling_for_color(state: &mut GameState, color: Color) {
    if color == Color::White {
        state.castling.white_kingside = false;
        state.castling.white_queenside = false;
    } else {
        state.castling.black_kingside = false;
        state.castling.black_queenside = false;
    }
}

fn clear_castling_corner(state: &mut GameState, square: Square) {
    match (square.file(), square.rank()) {
        (0, 0) => state.castling.white_queenside = false,
        (7, 0) => state.castling.white_kingside = false,
        (0, 7) => state.castling.black_queenside = false,
        (7, 7) => state.castling.black_kingside = false,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::san::parse_san;

    fn play(state: &mut GameState, san: &str, ply: usize) {
        let parsed = parse_san(san).unwrap();
        let mv = resolve(state, &parsed, san, ply).unwrap();
        apply(state, &mv);
    }

    #[test]
    fn pawn_double_push_sets_en_passant_and_resets_halfmove() {
        let mut state = GameState::initial();
        play(&mut state, "e4", 1);
        assert_eq!(state.en_passant, Some(Square::parse("e3").unwrap()));
        assert_eq!(state.halfmove, 0);
        assert_eq!(state.side_to_move, Color::Black);
        assert_eq!(state.fullmove, 1);
    }

    #[test]
    fn second_move_clears_stale_en_passant_and_advances_fullmove() {
        let mut state = GameState::initial();
        play(&mut state, "e4", 1);
        play(&mut state, "Nf6", 2);
        assert_eq!(state.en_passant, None);
        assert_eq!(state.fullmove, 2);
        assert_eq!(state.halfmove, 1);
    }

    #[test]
    fn king_move_clears_both_castling_rights() {
        let mut state = GameState::initial();
        play(&mut state, "e4", 1);
        play(&mut state, "e5", 2);
        play(&mut state, "Ke2", 3);
        assert!(!state.castling.white_kingside);
        assert!(!state.castling.white_queenside);
        assert!(state.castling.black_kingside);
    }

    #[test]
    fn rook_corner_move_clears_one_right() {
        let mut state = GameState::initial();
        play(&mut state, "Nf3", 1);
        play(&mut state, "Nf6", 2);
        play(&mut state, "g3", 3);
        play(&mut state, "g6", 4);
        play(&mut state, "Bg2", 5);
        play(&mut state, "Bg7", 6);
        play(&mut state, "O-O", 7);
        assert!(!state.castling.white_kingside);
        assert!(state.castling.white_queenside);
    }
}
