use thiserror::Error;

/// An error raised while parsing a single PGN game.
///
/// `game_index` is 1-based and set by [`crate::fold_games`] when folding
/// over a multi-game PGN stream; it is `None` when a single game is parsed
/// directly via [`crate::parse_game`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct PgnError {
    pub reason: String,
    pub game_index: Option<usize>,
}

impl PgnError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            game_index: None,
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.game_index = Some(index);
        self
    }
}
