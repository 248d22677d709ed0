use std::fmt;

use crate::error::FenError;

/// The side to move, the FEN "active color" field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn parse(field: &str) -> Result<Self, FenError> {
        match field {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            other => Err(FenError::InvalidActiveColor {
                found: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}
