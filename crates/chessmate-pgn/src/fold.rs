use crate::error::PgnError;
use crate::game::{parse_game, PgnGame};
use crate::split::split_games;

/// One parsed game plus its 1-based position and original raw text, as
/// produced by [`fold_games`] and [`stream_games`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord<'a> {
    pub index: usize,
    pub raw: &'a str,
    pub parsed: PgnGame,
}

/// Folds over every game in a multi-game PGN document, building up an
/// accumulator `Acc`.
///
/// Games are parsed lazily, one at a time. When a game fails to parse:
/// if `on_error` is `Some`, it is invoked with the 1-based index, the raw
/// game text, and the error, and folding continues with the next game;
/// if `on_error` is `None`, folding aborts immediately and the accumulator
/// built so far is returned. This ensures a single malformed game does not
/// poison its siblings when the caller opts in to per-game error handling.
pub fn fold_games<Acc>(
    pgn: &str,
    init: Acc,
    mut f: impl FnMut(Acc, GameRecord<'_>) -> Acc,
    mut on_error: Option<&mut dyn FnMut(usize, &str, &PgnError)>,
) -> Acc {
    let mut acc = init;
    for (offset, raw) in split_games(pgn).into_iter().enumerate() {
        let index = offset + 1;
        match parse_game(raw) {
            Ok(parsed) => {
                acc = f(acc, GameRecord { index, raw, parsed });
            }
            Err(err) => {
                let err = err.with_index(index);
                match on_error.as_deref_mut() {
                    Some(cb) => cb(index, raw, &err),
                    None => break,
                }
            }
        }
    }
    acc
}

/// An iterator over the games in a multi-game PGN document, yielding one
/// item per game without parsing ahead of the consumer.
///
/// This is the cooperative variant: the iterator itself performs no I/O
/// and never suspends, but because it
/// yields exactly one game per `next()` call, a caller driving it from an
/// async context (e.g. an HTTP handler persisting each game as it goes)
/// can freely `.await` between calls instead of having to process the
/// entire document before ceding control back to its executor.
pub struct GameStream<'a> {
    spans: std::vec::IntoIter<&'a str>,
    next_index: usize,
}

impl<'a> GameStream<'a> {
    #[must_use]
    pub fn new(pgn: &'a str) -> Self {
        Self {
            spans: split_games(pgn).into_iter(),
            next_index: 1,
        }
    }
}

impl<'a> Iterator for GameStream<'a> {
    type Item = (usize, &'a str, Result<PgnGame, PgnError>);

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.spans.next()?;
        let index = self.next_index;
        self.next_index += 1;
        let parsed = parse_game(raw).map_err(|e| e.with_index(index));
        Some((index, raw, parsed))
    }
}

/// Constructs a [`GameStream`] over the games in `pgn`.
#[must_use]
pub fn stream_games(pgn: &str) -> GameStream<'_> {
    GameStream::new(pgn)
}
