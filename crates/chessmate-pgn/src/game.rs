use indexmap::IndexMap;

use crate::error::PgnError;
use crate::header::parse_tag_line;
use crate::lexer::tokenize_movetext;

/// A single SAN move token with its position in the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToken {
    pub san: String,
    pub turn: u32,
    pub ply: u32,
}

/// A parsed PGN game: an ordered tag-pair mapping plus a flat move sequence.
///
/// Tag order is the order of first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PgnGame {
    pub headers: IndexMap<String, String>,
    pub moves: Vec<MoveToken>,
}

impl PgnGame {
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn san_tokens(&self) -> Vec<&str> {
        self.moves.iter().map(|m| m.san.as_str()).collect()
    }
}

/// Parses a single game's raw text (tag pairs followed by movetext) into a
/// [`PgnGame`]. Does not attempt to split multiple games apart; use
/// [`crate::fold_games`] or [`crate::split_games`] for multi-game input.
///
/// # Errors
///
/// Returns a [`PgnError`] if the game has no tag pairs and no movetext.
pub fn parse_game(raw: &str) -> Result<PgnGame, PgnError> {
    let mut headers = IndexMap::new();
    let mut movetext_lines = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim_end_matches('\r').trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            if let Some((key, value)) = parse_tag_line(trimmed) {
                headers.entry(key).or_insert(value);
            }
        } else {
            movetext_lines.push(trimmed);
        }
    }

    if headers.is_empty() && movetext_lines.is_empty() {
        return Err(PgnError::new("empty game: no tag pairs or movetext"));
    }

    let movetext = movetext_lines.join(" ");
    let tokens = tokenize_movetext(&movetext);
    let moves = tokens
        .into_iter()
        .enumerate()
        .map(|(i, san)| {
            let ply = (i + 1) as u32;
            MoveToken {
                san,
                turn: (ply + 1) / 2,
                ply,
            }
        })
        .collect();

    Ok(PgnGame { headers, moves })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_in_encounter_order() {
        let game = parse_game("[Event \"Test\"]\n[Site \"Somewhere\"]\n\n1. e4 e5 *").unwrap();
        let keys: Vec<&str> = game.headers.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Event", "Site"]);
    }

    #[test]
    fn assigns_ply_and_turn() {
        let game = parse_game("1. e4 e5 2. Nf3 Nc6 *").unwrap();
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves[0], MoveToken { san: "e4".into(), turn: 1, ply: 1 });
        assert_eq!(game.moves[1], MoveToken { san: "e5".into(), turn: 1, ply: 2 });
        assert_eq!(game.moves[2], MoveToken { san: "Nf3".into(), turn: 2, ply: 3 });
        assert_eq!(game.moves[3], MoveToken { san: "Nc6".into(), turn: 2, ply: 4 });
    }

    #[test]
    fn keeps_first_occurrence_on_duplicate_tags() {
        let game = parse_game("[Event \"First\"]\n[Event \"Second\"]\n\n1. e4 *").unwrap();
        assert_eq!(game.tag("Event"), Some("First"));
    }

    #[test]
    fn rejects_completely_empty_input() {
        assert!(parse_game("").is_err());
        assert!(parse_game("   \n  ").is_err());
    }

    #[test]
    fn handles_crlf_line_endings() {
        let game = parse_game("[Event \"Test\"]\r\n\r\n1. e4 e5\r\n*").unwrap();
        assert_eq!(game.tag("Event"), Some("Test"));
        assert_eq!(game.moves.len(), 2);
    }
}
