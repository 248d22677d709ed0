use chessmate_fen::{Color, Fen};

use crate::apply::apply;
use crate::error::EngineError;
use crate::resolve::resolve;
use crate::san::parse_san;
use crate::state::GameState;

/// Replays a sequence of already-tokenized SAN moves from the standard
/// starting position, returning one FEN per ply in order.
///
/// # Errors
///
/// Returns the first [`EngineError`] encountered while parsing or
/// resolving a SAN token; no FENs for plies after the failure are
/// produced.
pub fn replay_moves(sans: &[&str]) -> Result<Vec<Fen>, EngineError> {
    let mut state = GameState::initial();
    let mut fens = Vec::with_capacity(sans.len());
    for (offset, san) in sans.iter().enumerate() {
        let ply = offset + 1;
        let parsed = parse_san(san).ok_or_else(|| EngineError::InvalidSan {
            san: (*san).to_string(),
            ply,
        })?;
        let mv = resolve(&state, &parsed, san, ply)?;
        apply(&mut state, &mv);
        fens.push(state.to_fen());
    }
    Ok(fens)
}

/// Returns the FEN after move number `n` for `color`, at emitted-list
/// index `2(n-1) + (0 if White else 1)`.
///
/// # Errors
///
/// Returns [`EngineError::OutOfRange`] if `n <= 0` or the computed index
/// falls outside the replayed FEN list, and propagates any replay error.
pub fn fen_after_move(sans: &[&str], color: Color, n: i64) -> Result<Fen, EngineError> {
    if n <= 0 {
        return Err(EngineError::OutOfRange {
            n,
            total_plies: sans.len(),
        });
    }
    let side_offset = if color == Color::White { 0 } else { 1 };
    let index = 2 * (n - 1) + side_offset;
    let fens = replay_moves(sans)?;
    usize::try_from(index)
        .ok()
        .and_then(|idx| fens.get(idx))
        .cloned()
        .ok_or(EngineError::OutOfRange {
            n,
            total_plies: fens.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ply_count_matches_san_token_count() {
        let sans = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"];
        let fens = replay_moves(&sans).unwrap();
        assert_eq!(fens.len(), sans.len());
    }

    #[test]
    fn fourth_fen_matches_the_opening_replay_scenario() {
        let sans = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"];
        let fens = replay_moves(&sans).unwrap();
        let fourth = fens[3].to_string();
        assert!(fourth.ends_with(" w KQkq - 2 3"));
        let ranks: Vec<&str> = fens[3].placement().split('/').collect();
        assert!(ranks[2].contains('n'), "expected a black knight on rank 6, got {}", ranks[2]);
        assert!(ranks[5].contains('N'), "expected a white knight on rank 3, got {}", ranks[5]);
    }

    #[test]
    fn en_passant_capture_removes_both_pawns_and_resets_halfmove() {
        let sans = ["e4", "d5", "e5", "f5", "exf6"];
        let fens = replay_moves(&sans).unwrap();
        let last = fens.last().unwrap();
        let placement = last.placement();
        let ranks: Vec<&str> = placement.split('/').collect();
        assert!(ranks[2].contains('P'));
        assert_eq!(last.en_passant(), None);
        assert_eq!(last.halfmove_clock(), 0);
    }

    #[test]
    fn kingside_castle_updates_board_and_rights() {
        let sans = ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "O-O"];
        let fens = replay_moves(&sans).unwrap();
        assert_eq!(fens.len(), 7);
        let seventh = &fens[6];
        assert_eq!(seventh.castling().to_string(), "kq");
        assert_eq!(seventh.active_color(), Color::Black);
        let ranks: Vec<&str> = seventh.placement().split('/').collect();
        assert_eq!(ranks[7], "RNBQ1RK1");
    }

    #[test]
    fn fen_after_move_indexes_by_color_and_move_number() {
        let sans = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"];
        let white_move_3 = fen_after_move(&sans, Color::White, 3).unwrap();
        let black_move_2 = fen_after_move(&sans, Color::Black, 2).unwrap();
        let fens = replay_moves(&sans).unwrap();
        assert_eq!(white_move_3, fens[4]);
        assert_eq!(black_move_2, fens[3]);
    }

    #[test]
    fn fen_after_move_rejects_non_positive_move_numbers() {
        let sans = ["e4"];
        let err = fen_after_move(&sans, Color::White, 0).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { .. }));
    }

    #[test]
    fn invalid_san_token_reports_the_offending_ply() {
        let sans = ["e4", "???"];
        let err = replay_moves(&sans).unwrap_err();
        assert_eq!(err.ply(), Some(2));
    }
}
