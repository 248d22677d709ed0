use std::fmt;

use crate::castling::CastlingRights;
use crate::color::Color;
use crate::error::FenError;
use crate::placement;

/// A fully validated, canonically-formatted FEN string, split into its six
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    placement: String,
    active: Color,
    castling: CastlingRights,
    en_passant: Option<String>,
    halfmove: u32,
    fullmove: u32,
}

impl Fen {
    #[must_use]
    pub fn placement(&self) -> &str {
        &self.placement
    }

    #[must_use]
    pub fn active_color(&self) -> Color {
        self.active
    }

    #[must_use]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[must_use]
    pub fn en_passant(&self) -> Option<&str> {
        self.en_passant.as_deref()
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove
    }

    /// Validates and canonicalizes a raw FEN string from header to footer.
    ///
    /// # Errors
    ///
    /// Returns the first [`FenError`] encountered while checking field
    /// count, piece placement, active color, castling rights, en-passant
    /// square, and the two move counters.
    pub fn normalize(raw: &str) -> Result<Self, FenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FenError::Empty);
        }

        let fields: Vec<&str> = trimmed.split(' ').filter(|s| !s.is_empty()).collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount {
                found: fields.len(),
            });
        }

        let placement = fields[0];
        placement::validate_placement(placement)?;

        let active = Color::parse(fields[1])?;
        let castling = CastlingRights::parse(fields[2])?;
        let en_passant = parse_en_passant(fields[3], active)?;
        let halfmove = parse_halfmove(fields[4])?;
        let fullmove = parse_fullmove(fields[5])?;

        Ok(Self {
            placement: placement.to_string(),
            active,
            castling,
            en_passant,
            halfmove,
            fullmove,
        })
    }

    /// Re-constructs a [`Fen`] from already-validated parts, used by the
    /// SAN→FEN engine to emit a FEN after every ply without re-parsing its
    /// own output. The placement string is trusted as-is.
    #[must_use]
    pub fn from_parts(
        placement: String,
        active: Color,
        castling: CastlingRights,
        en_passant: Option<String>,
        halfmove: u32,
        fullmove: u32,
    ) -> Self {
        Self {
            placement,
            active,
            castling,
            en_passant,
            halfmove,
            fullmove,
        }
    }
}

fn parse_en_passant(field: &str, active: Color) -> Result<Option<String>, FenError> {
    if field == "-" {
        return Ok(None);
    }

    let bytes = field.as_bytes();
    if bytes.len() != 2 {
        return Err(FenError::InvalidEnPassant {
            found: field.to_string(),
        });
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(rank == b'3' || rank == b'6') {
        return Err(FenError::InvalidEnPassant {
            found: field.to_string(),
        });
    }

    let expected_rank = if active == Color::White { b'6' } else { b'3' };
    if rank != expected_rank {
        return Err(FenError::EnPassantRankMismatch);
    }

    Ok(Some(field.to_string()))
}

fn parse_halfmove(field: &str) -> Result<u32, FenError> {
    field.parse::<u32>().map_err(|_| FenError::InvalidHalfmove {
        found: field.to_string(),
    })
}

fn parse_fullmove(field: &str) -> Result<u32, FenError> {
    let value = field.parse::<u32>().map_err(|_| FenError::InvalidFullmove {
        found: field.to_string(),
    })?;
    if value == 0 {
        return Err(FenError::InvalidFullmove {
            found: field.to_string(),
        });
    }
    Ok(value)
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement,
            self.active,
            self.castling,
            self.en_passant.as_deref().unwrap_or("-"),
            self.halfmove,
            self.fullmove
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn normalize_start_position_is_unchanged() {
        let fen = Fen::normalize(START).unwrap();
        assert_eq!(fen.to_string(), START);
    }

    #[test]
    fn normalize_reorders_castling_rights() {
        let shuffled = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w qkKQ - 0 1";
        let fen = Fen::normalize(shuffled).unwrap();
        assert_eq!(fen.to_string(), START);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = Fen::normalize(START).unwrap().to_string();
        let twice = Fen::normalize(&once).unwrap().to_string();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rejects_missing_kings() {
        let err = Fen::normalize("8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "FEN must contain exactly one white king and one black king"
        );
    }

    #[test]
    fn normalize_rejects_empty_input() {
        assert_eq!(Fen::normalize("   ").unwrap_err(), FenError::Empty);
    }

    #[test]
    fn normalize_rejects_wrong_field_count() {
        let err = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -")
            .unwrap_err();
        assert_eq!(err, FenError::FieldCount { found: 5 });
    }

    #[test]
    fn normalize_validates_en_passant_rank_matches_active_color() {
        // e6 with black to move mismatches the required rank 3.
        let err = Fen::normalize(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e6 0 1",
        )
        .unwrap_err();
        assert_eq!(err, FenError::EnPassantRankMismatch);
    }

    #[test]
    fn normalize_accepts_valid_en_passant_square() {
        let fen =
            Fen::normalize("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
                .unwrap();
        assert_eq!(fen.en_passant(), Some("e6"));
    }

    #[test]
    fn normalize_rejects_zero_fullmove() {
        let err = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0")
            .unwrap_err();
        assert!(matches!(err, FenError::InvalidFullmove { .. }));
    }
}
