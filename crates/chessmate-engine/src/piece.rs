use chessmate_fen::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Parses the uppercase piece letter used in SAN (`N`, `B`, `R`, `Q`,
    /// `K`); pawns have no letter and are handled by the caller.
    #[must_use]
    pub fn from_san_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Parses a promotion letter (`N`, `B`, `R`, `Q` only).
    #[must_use]
    pub fn from_promotion_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let upper = match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        };
        if color == Color::White {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}
