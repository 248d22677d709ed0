const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Strips comments, variations, NAGs, and move-number indicators from raw
/// movetext, returning the remaining SAN tokens in order. Stops at the
/// first result token, whether trailing or embedded mid-movetext
///.
pub(crate) fn tokenize_movetext(text: &str) -> Vec<String> {
    let stripped = strip_comments_and_variations(text);
    let mut tokens = Vec::new();

    for raw in stripped.split_whitespace() {
        if RESULT_TOKENS.contains(&raw) {
            break;
        }
        if let Some(san) = clean_token(raw) {
            tokens.push(san);
        }
    }

    tokens
}

fn strip_comments_and_variations(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                for next in chars.by_ref() {
                    if next == '}' {
                        break;
                    }
                }
                out.push(' ');
            }
            ';' => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
                out.push(' ');
            }
            '(' => {
                skip_balanced(&mut chars, '(', ')');
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

fn skip_balanced(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, open: char, close: char) {
    let mut depth = 1usize;
    for c in chars.by_ref() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
    }
}

/// Cleans a single whitespace-separated movetext token: drops NAGs and
/// move-number indicators, and strips trailing check/mate/annotation glyphs
/// from the remaining SAN. Returns `None` if nothing SAN-like remains.
fn clean_token(raw: &str) -> Option<String> {
    if raw.starts_with('$') && raw[1..].chars().all(|c| c.is_ascii_digit()) && raw.len() > 1 {
        return None;
    }

    let stripped = strip_move_number_prefix(raw);
    if stripped.is_empty() {
        return None;
    }

    let cleaned = stripped.trim_end_matches(['!', '?', '+', '#']);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Strips a leading move-number indicator (`12.` or `12...`) from `raw`,
/// whether or not it is glued directly to the following SAN token. A token
/// that merely starts with digits but isn't followed by a dot — such as the
/// `0-0`/`0-0-0` digit-style castling notation — is returned unchanged.
fn strip_move_number_prefix(raw: &str) -> &str {
    let digit_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    if digit_end == 0 {
        return raw;
    }
    let rest = &raw[digit_end..];
    if !rest.starts_with('.') {
        return raw;
    }
    let dot_end = rest.find(|c: char| c != '.').unwrap_or(rest.len());
    &rest[dot_end..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_simple_movetext() {
        let tokens = tokenize_movetext("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6");
        assert_eq!(tokens, vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
    }

    #[test]
    fn strips_block_comments() {
        let tokens = tokenize_movetext("1. e4 {good move} e5");
        assert_eq!(tokens, vec!["e4", "e5"]);
    }

    #[test]
    fn strips_nested_variations() {
        let tokens = tokenize_movetext("1. e4 (1. d4 d5 (1... Nf6)) e5");
        assert_eq!(tokens, vec!["e4", "e5"]);
    }

    #[test]
    fn strips_nags_and_glyphs() {
        let tokens = tokenize_movetext("1. e4! e5? 2. Nf3!? Nc6 $16");
        assert_eq!(tokens, vec!["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn stops_at_trailing_result() {
        let tokens = tokenize_movetext("1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0");
        assert_eq!(tokens, vec!["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7"]);
    }

    #[test]
    fn stops_at_embedded_result() {
        let tokens = tokenize_movetext("1. e4 e5 1/2-1/2 2. Nf3 Nc6");
        assert_eq!(tokens, vec!["e4", "e5"]);
    }

    #[test]
    fn preserves_digit_style_castling_notation() {
        let tokens = tokenize_movetext("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. 0-0 0-0-0");
        assert_eq!(tokens[6], "0-0");
        assert_eq!(tokens[7], "0-0-0");
    }

    #[test]
    fn strips_move_number_glued_directly_to_the_move() {
        let tokens = tokenize_movetext("1.e4 e5 2.Nf3");
        assert_eq!(tokens, vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn preserves_captures_and_promotions() {
        let tokens = tokenize_movetext("1. e4 d5 2. exd5 Qxd5 3. Nc3 Qd8 4. d4 c6 5. Nf3 Bg4 6. h3 Bxf3");
        assert!(tokens.contains(&"exd5".to_string()));
        assert!(tokens.contains(&"Bxf3".to_string()));
    }
}
