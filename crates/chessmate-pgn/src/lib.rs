//! PGN tag-pair and movetext tokenization.
//!
//! Splits a PGN document into games, parses tag pairs in encounter
//! order, and tokenizes movetext into plain SAN strings with ply/turn
//! numbering.

mod error;
mod fold;
mod game;
mod header;
mod lexer;
mod split;

pub use error::PgnError;
pub use fold::{fold_games, stream_games, GameRecord, GameStream};
pub use game::{parse_game, MoveToken, PgnGame};
pub use split::split_games;
