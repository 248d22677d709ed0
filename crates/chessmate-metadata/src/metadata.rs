use chessmate_openings::{canonical_name_of_eco, slugify};
use chessmate_pgn::PgnGame;

use crate::date::normalize_date;
use crate::player::PlayerInfo;

/// Normalized metadata extracted from a single PGN game's header tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameMetadata {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub white: PlayerInfo,
    pub black: PlayerInfo,
    pub eco_code: Option<String>,
    pub opening_name: Option<String>,
    pub opening_slug: Option<String>,
    pub result: Option<String>,
}

fn non_placeholder(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty() && *s != "?")
        .map(str::to_string)
}

/// Extracts a [`GameMetadata`] record from a parsed game's tag pairs.
///
/// `opening_name` prefers the PGN's own `Opening` tag and falls back to
/// the ECO-derived canonical name; `opening_slug` is derived from
/// whichever name was resolved.
#[must_use]
pub fn extract(game: &PgnGame) -> GameMetadata {
    let eco_code = non_placeholder(game.tag("ECO")).map(|s| s.to_uppercase());

    let opening_name = non_placeholder(game.tag("Opening"))
        .or_else(|| eco_code.as_deref().and_then(canonical_name_of_eco).map(str::to_string));

    let opening_slug = opening_name
        .as_deref()
        .map(slugify)
        .or_else(|| eco_code.as_deref().map(slugify));

    GameMetadata {
        event: non_placeholder(game.tag("Event")),
        site: non_placeholder(game.tag("Site")),
        date: game.tag("Date").and_then(normalize_date),
        round: non_placeholder(game.tag("Round")),
        white: PlayerInfo::from_tags(game.tag("White"), game.tag("WhiteFideId"), game.tag("WhiteElo")),
        black: PlayerInfo::from_tags(game.tag("Black"), game.tag("BlackFideId"), game.tag("BlackElo")),
        eco_code,
        opening_name,
        opening_slug,
        result: non_placeholder(game.tag("Result")),
    }
}
