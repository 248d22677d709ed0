use thiserror::Error;

/// Errors raised while resolving or applying a SAN move against a board
/// state. Every variant carries the 1-based ply at which it occurred.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("ply {ply}: could not parse SAN token '{san}'")]
    InvalidSan { san: String, ply: usize },

    #[error("ply {ply}: no source square found for '{san}'")]
    NoSource { san: String, ply: usize },

    #[error("ply {ply}: move '{san}' is ambiguous between multiple source squares")]
    Ambiguous { san: String, ply: usize },

    #[error("ply {ply}: '{san}' does not target a legal capture or en-passant square")]
    IllegalCapture { san: String, ply: usize },

    #[error("requested move number {n} is out of range for a game with {total_plies} plies")]
    OutOfRange { n: i64, total_plies: usize },
}

impl EngineError {
    #[must_use]
    pub fn ply(&self) -> Option<usize> {
        match self {
            EngineError::InvalidSan { ply, .. }
            | EngineError::NoSource { ply, .. }
            | EngineError::Ambiguous { ply, .. }
            | EngineError::IllegalCapture { ply, .. } => Some(*ply),
            EngineError::OutOfRange { .. } => None,
        }
    }
}
