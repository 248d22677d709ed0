use md5::{Digest, Md5};

use crate::fen::Fen;

/// Stable hex digest of a normalized FEN's canonical bytes.
///
/// Used as the deterministic vector-id so that re-embedding the same
/// position (e.g. after a worker retry) produces an idempotent upsert
///.
#[must_use]
pub fn hash(fen: &Fen) -> String {
    let mut hasher = Md5::new();
    hasher.update(fen.to_string().as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// The first 16 hex characters of [`hash`]; handy for compact logging where
/// the full 32-character digest would be noise.
#[must_use]
pub fn short_hash(fen: &Fen) -> String {
    hash(fen)[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let fen = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert_eq!(hash(&fen), hash(&fen));
        assert_eq!(hash(&fen).len(), 32);
    }

    #[test]
    fn hash_differs_for_different_positions() {
        let a = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let b = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_ne!(hash(&a), hash(&b));
    }

    #[test]
    fn short_hash_is_prefix_of_hash() {
        let fen = Fen::normalize("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert!(hash(&fen).starts_with(&short_hash(&fen)));
    }
}
