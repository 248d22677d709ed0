use chessmate_fen::Color;

use crate::error::EngineError;
use crate::piece::{Piece, PieceKind};
use crate::san::ParsedMove;
use crate::square::Square;
use crate::state::GameState;

/// A fully resolved move against a concrete board state, ready to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMove {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured_square: Option<Square>,
    pub promotion: Option<PieceKind>,
    pub castle_rook: Option<(Square, Square)>,
}

pub fn resolve(
    state: &GameState,
    parsed: &ParsedMove,
    san: &str,
    ply: usize,
) -> Result<ResolvedMove, EngineError> {
    match *parsed {
        ParsedMove::CastleKingside => Ok(resolve_castle(state, true)),
        ParsedMove::CastleQueenside => Ok(resolve_castle(state, false)),
        ParsedMove::Piece {
            kind,
            disambig_file,
            disambig_rank,
            capture,
            dest,
        } => resolve_piece_move(state, kind, disambig_file, disambig_rank, capture, dest, san, ply),
        ParsedMove::Pawn {
            source_file,
            capture,
            dest,
            promotion,
        } => resolve_pawn_move(state, source_file, capture, dest, promotion, san, ply),
    }
}

fn resolve_castle(state: &GameState, kingside: bool) -> ResolvedMove {
    let color = state.side_to_move;
    let home_rank = if color == Color::White { 0 } else { 7 };
    let king_from = Square::new(4, home_rank);
    let (king_to, rook_from, rook_to) = if kingside {
        (Square::new(6, home_rank), Square::new(7, home_rank), Square::new(5, home_rank))
    } else {
        (Square::new(2, home_rank), Square::new(0, home_rank), Square::new(3, home_rank))
    };
    ResolvedMove {
        from: king_from,
        to: king_to,
        piece: Piece::new(color, PieceKind::King),
        captured_square: None,
        promotion: None,
        castle_rook: Some((rook_from, rook_to)),
    }
}

fn is_knight_move(from: Square, to: Square) -> bool {
    let df = (i8::from(to.file()) - i8::from(from.file())).abs();
    let dr = (i8::from(to.rank()) - i8::from(from.rank())).abs();
    (df, dr) == (1, 2) || (df, dr) == (2, 1)
}

fn is_diagonal(from: Square, to: Square) -> bool {
    let df = (i8::from(to.file()) - i8::from(from.file())).abs();
    let dr = (i8::from(to.rank()) - i8::from(from.rank())).abs();
    df == dr && df != 0
}

fn is_orthogonal(from: Square, to: Square) -> bool {
    (from.file() == to.file()) != (from.rank() == to.rank())
}

fn is_king_step(from: Square, to: Square) -> bool {
    let df = (i8::from(to.file()) - i8::from(from.file())).abs();
    let dr = (i8::from(to.rank()) - i8::from(from.rank())).abs();
    (df, dr) != (0, 0) && df <= 1 && dr <= 1
}

fn reachable(board: &crate::board::Board, kind: PieceKind, from: Square, to: Square) -> bool {
    match kind {
        PieceKind::Knight => is_knight_move(from, to),
        PieceKind::Bishop => is_diagonal(from, to) && board.is_clear_path(from, to),
        PieceKind::Rook => is_orthogonal(from, to) && board.is_clear_path(from, to),
        PieceKind::Queen => {
            (is_diagonal(from, to) || is_orthogonal(from, to)) && board.is_clear_path(from, to)
        }
        PieceKind::King => is_king_step(from, to),
        PieceKind::Pawn => false,
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_piece_move(
    state: &GameState,
    kind: PieceKind,
    disambig_file: Option<u8>,
    disambig_rank: Option<u8>,
    capture: bool,
    dest: Square,
    san: &str,
    ply: usize,
) -> Result<ResolvedMove, EngineError> {
    let color = state.side_to_move;
    let candidates: Vec<Square> = state
        .board
        .find(color, kind)
        .filter(|sq| disambig_file.is_none_or(|f| sq.file() == f))
        .filter(|sq| disambig_rank.is_none_or(|r| sq.rank() == r))
        .filter(|sq| reachable(&state.board, kind, *sq, dest))
        .collect();

    let from = match candidates.as_slice() {
        [] => {
            return Err(EngineError::NoSource {
                san: san.to_string(),
                ply,
            })
        }
        [only] => *only,
        _ => {
            return Err(EngineError::Ambiguous {
                san: san.to_string(),
                ply,
            })
        }
    };

    let captured_square = if capture || state.board.get(dest).is_some() {
        Some(dest)
    } else {
        None
    };

    Ok(ResolvedMove {
        from,
        to: dest,
        piece: Piece::new(color, kind),
        captured_square,
        promotion: None,
        castle_rook: None,
    })
}

fn resolve_pawn_move(
    state: &GameState,
    source_file: Option<u8>,
    capture: bool,
    dest: Square,
    promotion: Option<PieceKind>,
    san: &str,
    ply: usize,
) -> Result<ResolvedMove, EngineError> {
    let color = state.side_to_move;
    let dir: i8 = if color == Color::White { 1 } else { -1 };
    let pawn = Piece::new(color, PieceKind::Pawn);

    if !capture {
        let one_back = dest
            .offset(0, -dir)
            .ok_or_else(|| no_source(san, ply))?;
        if state.board.get(one_back) == Some(pawn) {
            return Ok(ResolvedMove {
                from: one_back,
                to: dest,
                piece: pawn,
                captured_square: None,
                promotion,
                castle_rook: None,
            });
        }

        let home_rank: i8 = if color == Color::White { 1 } else { 6 };
        let expected_dest_rank = home_rank + 2 * dir;
        let two_back = dest.offset(0, -2 * dir);
        if i8::from(dest.rank()) == expected_dest_rank {
            if let Some(two_back) = two_back {
                if state.board.get(two_back) == Some(pawn) && state.board.get(one_back).is_none() {
                    return Ok(ResolvedMove {
                        from: two_back,
                        to: dest,
                        piece: pawn,
                        captured_square: None,
                        promotion,
                        castle_rook: None,
                    });
                }
            }
        }

        return Err(no_source(san, ply));
    }

    let candidate_files: Vec<u8> = match source_file {
        Some(f) => vec![f],
        None => {
            let mut files = Vec::new();
            if dest.file() > 0 {
                files.push(dest.file() - 1);
            }
            if dest.file() < 7 {
                files.push(dest.file() + 1);
            }
            files
        }
    };

    let mut saw_pawn_source = false;
    let mut accepted = Vec::new();
    for file in candidate_files {
        let from = match dest.offset(i8::from(file) - i8::from(dest.file()), -dir) {
            Some(sq) => sq,
            None => continue,
        };
        if state.board.get(from) != Some(pawn) {
            continue;
        }
        saw_pawn_source = true;

        let normal_capture = state.board.get(dest).is_some_and(|p| p.color != color);
        let captured_en_passant_square = dest.offset(0, -dir);
        let en_passant = state.en_passant == Some(dest)
            && captured_en_passant_square
                .is_some_and(|sq| state.board.get(sq) == Some(Piece::new(color.opposite(), PieceKind::Pawn)));

        if normal_capture {
            accepted.push((from, Some(dest)));
        } else if en_passant {
            accepted.push((from, captured_en_passant_square));
        }
    }

    match accepted.as_slice() {
        [] if !saw_pawn_source => Err(no_source(san, ply)),
        [] => Err(EngineError::IllegalCapture {
            san: san.to_string(),
            ply,
        }),
        [(from, captured)] => Ok(ResolvedMove {
            from: *from,
            to: dest,
            piece: pawn,
            captured_square: *captured,
            promotion,
            castle_rook: None,
        }),
        _ => Err(EngineError::Ambiguous {
            san: san.to_string(),
            ply,
        }),
    }
}

fn no_source(san: &str, ply: usize) -> EngineError {
    EngineError::NoSource {
        san: san.to_string(),
        ply,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::san::parse_san;

    #[test]
    fn resolves_opening_knight_development() {
        let state = GameState::initial();
        let parsed = parse_san("Nf3").unwrap();
        let mv = resolve(&state, &parsed, "Nf3", 1).unwrap();
        assert_eq!(mv.from, Square::parse("g1").unwrap());
        assert_eq!(mv.to, Square::parse("f3").unwrap());
    }

    #[test]
    fn resolves_pawn_double_push() {
        let state = GameState::initial();
        let parsed = parse_san("e4").unwrap();
        let mv = resolve(&state, &parsed, "e4", 1).unwrap();
        assert_eq!(mv.from, Square::parse("e2").unwrap());
        assert_eq!(mv.to, Square::parse("e4").unwrap());
        assert_eq!(mv.captured_square, None);
    }

    #[test]
    fn rejects_pawn_push_with_no_legal_source() {
        let state = GameState::initial();
        let parsed = parse_san("e5").unwrap();
        let err = resolve(&state, &parsed, "e5", 1).unwrap_err();
        assert!(matches!(err, EngineError::NoSource { .. }));
    }

    #[test]
    fn resolves_kingside_castle_geometry() {
        let state = GameState::initial();
        let mv = resolve_castle(&state, true);
        assert_eq!(mv.from, Square::parse("e1").unwrap());
        assert_eq!(mv.to, Square::parse("g1").unwrap());
        assert_eq!(
            mv.castle_rook,
            Some((Square::parse("h1").unwrap(), Square::parse("f1").unwrap()))
        );
    }
}
