/// Splits raw multi-game PGN text into per-game substrings.
///
/// A new game begins whenever a `[Tag "..."]` line is seen after movetext
/// (or after another already-populated game's tag block), mirroring how
/// real PGN archives separate games with a blank line between a trailing
/// result and the next `[Event ...]` block — but this does not require the
/// blank line to be present, and is CRLF-robust.
#[must_use]
pub fn split_games(raw: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0usize;
    let mut header_in_progress = false;
    let mut game_has_content = false;
    let mut offset = 0usize;

    for line in raw.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']).trim();
        if !trimmed.is_empty() {
            if trimmed.starts_with('[') {
                if !header_in_progress && game_has_content {
                    spans.push(raw[start..offset].trim_end());
                    start = offset;
                    game_has_content = false;
                }
                header_in_progress = true;
            } else {
                header_in_progress = false;
            }
            game_has_content = true;
        }
        offset += line.len();
    }

    if game_has_content {
        spans.push(raw[start..].trim_end());
    }

    spans.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_two_games_with_blank_line() {
        let pgn = "[Event \"A\"]\n\n1. e4 e5 1-0\n\n[Event \"B\"]\n\n1. d4 d5 *";
        let games = split_games(pgn);
        assert_eq!(games.len(), 2);
        assert!(games[0].contains("Event \"A\""));
        assert!(games[1].contains("Event \"B\""));
    }

    #[test]
    fn splits_without_blank_line_between_games() {
        let pgn = "[Event \"A\"]\n1. e4 e5 1-0\n[Event \"B\"]\n1. d4 d5 *";
        let games = split_games(pgn);
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn handles_crlf_separators() {
        let pgn = "[Event \"A\"]\r\n\r\n1. e4 e5 1-0\r\n\r\n[Event \"B\"]\r\n\r\n1. d4 d5 *";
        let games = split_games(pgn);
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn single_game_returns_one_span() {
        let pgn = "[Event \"Solo\"]\n\n1. e4 e5 *";
        assert_eq!(split_games(pgn).len(), 1);
    }

    #[test]
    fn empty_input_returns_no_games() {
        assert!(split_games("").is_empty());
        assert!(split_games("   \n\n  ").is_empty());
    }
}
