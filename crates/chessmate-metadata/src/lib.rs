//! PGN header extraction into normalized game metadata.
//!
//! Turns a parsed game's tag pairs into a [`GameMetadata`] record,
//! resolving the opening name/slug via the openings catalogue when the
//! PGN itself doesn't carry an `Opening` tag.

mod date;
mod metadata;
mod player;

pub use metadata::{extract, GameMetadata};
pub use player::PlayerInfo;
