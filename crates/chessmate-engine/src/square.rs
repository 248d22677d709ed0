/// A board square, stored as a 0-indexed `rank * 8 + file` offset (`a1` =
/// 0, `h1` = 7, `a8` = 56, `h8` = 63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square(u8);

impl Square {
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self(rank * 8 + file)
    }

    #[must_use]
    pub fn from_index(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index)
    }

    #[must_use]
    pub fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[must_use]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Parses an algebraic square such as `"e4"`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Self::new(file - b'a', rank - b'1'))
    }

    #[must_use]
    pub fn to_algebraic(self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = (b'1' + self.rank()) as char;
        format!("{file}{rank}")
    }

    /// Offsets this square by `(df, dr)` files/ranks, returning `None` if
    /// the result falls off the board.
    #[must_use]
    pub fn offset(self, df: i8, dr: i8) -> Option<Self> {
        let file = i8::try_from(self.file()).ok()? + df;
        let rank = i8::try_from(self.rank()).ok()? + dr;
        if !(0..8).contains(&file) || !(0..8).contains(&rank) {
            return None;
        }
        Some(Self::new(file as u8, rank as u8))
    }
}
