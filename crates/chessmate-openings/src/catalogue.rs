/// A single row of the static ECO openings catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub eco_start: &'static str,
    pub eco_end: &'static str,
    pub canonical: &'static str,
    pub slug: &'static str,
    pub synonyms: &'static [&'static str],
}

/// Static ECO-range catalogue. ECO comparison is lexicographic on
/// uppercase strings Entries are ordered by `eco_start` so
/// the "first matching entry" rule in [`crate::canonical_name_of_eco`] is
/// well-defined even where a later, narrower range nests inside an earlier
/// broad one (there are none here, but the ordering is a documented
/// invariant of this table, not an accident).
pub static OPENINGS: &[Entry] = &[
    Entry {
        eco_start: "A00",
        eco_end: "A03",
        canonical: "Bird's Opening",
        slug: "birds_opening",
        synonyms: &["bird's opening", "birds opening", "bird opening"],
    },
    Entry {
        eco_start: "A04",
        eco_end: "A09",
        canonical: "Reti Opening",
        slug: "reti_opening",
        synonyms: &["reti opening", "reti"],
    },
    Entry {
        eco_start: "A10",
        eco_end: "A39",
        canonical: "English Opening",
        slug: "english_opening",
        synonyms: &["english opening", "english"],
    },
    Entry {
        eco_start: "A40",
        eco_end: "A55",
        canonical: "Queen's Pawn Game",
        slug: "queens_pawn_game",
        synonyms: &["queen's pawn game", "queens pawn game"],
    },
    Entry {
        eco_start: "A56",
        eco_end: "A79",
        canonical: "Benoni Defense",
        slug: "benoni_defense",
        synonyms: &["benoni defense", "benoni defence", "benoni"],
    },
    Entry {
        eco_start: "A80",
        eco_end: "A99",
        canonical: "Dutch Defense",
        slug: "dutch_defense",
        synonyms: &["dutch defense", "dutch defence", "dutch"],
    },
    Entry {
        eco_start: "B00",
        eco_end: "B00",
        canonical: "King's Pawn Game",
        slug: "kings_pawn_game",
        synonyms: &["king's pawn game", "kings pawn game"],
    },
    Entry {
        eco_start: "B01",
        eco_end: "B01",
        canonical: "Scandinavian Defense",
        slug: "scandinavian_defense",
        synonyms: &["scandinavian defense", "scandinavian defence", "scandinavian", "center counter"],
    },
    Entry {
        eco_start: "B02",
        eco_end: "B05",
        canonical: "Alekhine Defense",
        slug: "alekhine_defense",
        synonyms: &["alekhine defense", "alekhine defence", "alekhine's defense", "alekhine"],
    },
    Entry {
        eco_start: "B06",
        eco_end: "B06",
        canonical: "Modern Defense",
        slug: "modern_defense",
        synonyms: &["modern defense", "modern defence"],
    },
    Entry {
        eco_start: "B07",
        eco_end: "B09",
        canonical: "Pirc Defense",
        slug: "pirc_defense",
        synonyms: &["pirc defense", "pirc defence", "pirc"],
    },
    Entry {
        eco_start: "B10",
        eco_end: "B19",
        canonical: "Caro-Kann Defense",
        slug: "caro_kann_defense",
        synonyms: &["caro-kann defense", "caro-kann defence", "caro kann", "caro-kann"],
    },
    Entry {
        eco_start: "B20",
        eco_end: "B99",
        canonical: "Sicilian Defense",
        slug: "sicilian_defense",
        synonyms: &["sicilian defense", "sicilian defence", "sicilian", "najdorf", "dragon variation"],
    },
    Entry {
        eco_start: "C00",
        eco_end: "C19",
        canonical: "French Defense",
        slug: "french_defense",
        synonyms: &["french defense", "french defence", "french"],
    },
    Entry {
        eco_start: "C20",
        eco_end: "C24",
        canonical: "King's Pawn Opening",
        slug: "kings_pawn_opening",
        synonyms: &["king's pawn opening", "kings pawn opening", "center game"],
    },
    Entry {
        eco_start: "C25",
        eco_end: "C29",
        canonical: "Vienna Game",
        slug: "vienna_game",
        synonyms: &["vienna game", "vienna"],
    },
    Entry {
        eco_start: "C30",
        eco_end: "C39",
        canonical: "King's Gambit",
        slug: "kings_gambit",
        synonyms: &["king's gambit", "kings gambit"],
    },
    Entry {
        eco_start: "C40",
        eco_end: "C40",
        canonical: "King's Knight Opening",
        slug: "kings_knight_opening",
        synonyms: &["king's knight opening", "kings knight opening"],
    },
    Entry {
        eco_start: "C41",
        eco_end: "C41",
        canonical: "Philidor Defense",
        slug: "philidor_defense",
        synonyms: &["philidor defense", "philidor defence", "philidor"],
    },
    Entry {
        eco_start: "C42",
        eco_end: "C43",
        canonical: "Petrov's Defense",
        slug: "petrovs_defense",
        synonyms: &["petrov's defense", "petrovs defense", "petroff defense", "petrov"],
    },
    Entry {
        eco_start: "C44",
        eco_end: "C45",
        canonical: "Scotch Game",
        slug: "scotch_game",
        synonyms: &["scotch game", "scotch"],
    },
    Entry {
        eco_start: "C46",
        eco_end: "C49",
        canonical: "Four Knights Game",
        slug: "four_knights_game",
        synonyms: &["four knights game", "four knights"],
    },
    Entry {
        eco_start: "C50",
        eco_end: "C59",
        canonical: "Italian Game",
        slug: "italian_game",
        synonyms: &["italian game", "giuoco piano", "italian"],
    },
    Entry {
        eco_start: "C60",
        eco_end: "C99",
        canonical: "Ruy Lopez",
        slug: "ruy_lopez",
        synonyms: &["ruy lopez", "spanish opening", "spanish game"],
    },
    Entry {
        eco_start: "D00",
        eco_end: "D05",
        canonical: "Queen's Pawn Game",
        slug: "queens_pawn_game",
        synonyms: &["queen's pawn game", "queens pawn game", "blackmar-diemer"],
    },
    Entry {
        eco_start: "D06",
        eco_end: "D09",
        canonical: "Queen's Gambit",
        slug: "queens_gambit",
        synonyms: &["queen's gambit", "queens gambit", "qgd", "queen's gambit declined", "queen's gambit accepted"],
    },
    Entry {
        eco_start: "D10",
        eco_end: "D19",
        canonical: "Slav Defense",
        slug: "slav_defense",
        synonyms: &["slav defense", "slav defence", "slav"],
    },
    Entry {
        eco_start: "D20",
        eco_end: "D69",
        canonical: "Queen's Gambit",
        slug: "queens_gambit",
        synonyms: &["queen's gambit", "queens gambit", "qgd", "queen's gambit declined", "queen's gambit accepted"],
    },
    Entry {
        eco_start: "D70",
        eco_end: "D99",
        canonical: "Grunfeld Defense",
        slug: "grunfeld_defense",
        synonyms: &["grunfeld defense", "grunfeld defence", "gruenfeld", "grunfeld"],
    },
    Entry {
        eco_start: "E00",
        eco_end: "E09",
        canonical: "Catalan Opening",
        slug: "catalan_opening",
        synonyms: &["catalan opening", "catalan"],
    },
    Entry {
        eco_start: "E10",
        eco_end: "E19",
        canonical: "Queen's Indian Defense",
        slug: "queens_indian_defense",
        synonyms: &["queen's indian defense", "queens indian defense", "queen's indian defence", "queen's indian"],
    },
    Entry {
        eco_start: "E20",
        eco_end: "E59",
        canonical: "Nimzo-Indian Defense",
        slug: "nimzo_indian_defense",
        synonyms: &["nimzo-indian defense", "nimzo-indian defence", "nimzo indian", "nimzo-indian"],
    },
    Entry {
        eco_start: "E60",
        eco_end: "E99",
        canonical: "King's Indian Defense",
        slug: "kings_indian_defense",
        synonyms: &["king's indian defense", "kings indian defense", "king's indian defence", "king's indian", "kid"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_sorted_by_start_and_non_overlapping_within_letter() {
        for window in OPENINGS.windows(2) {
            let [a, b] = window else { unreachable!() };
            if a.eco_start.chars().next() == b.eco_start.chars().next() {
                assert!(a.eco_end < b.eco_start, "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn every_entry_has_at_least_one_synonym() {
        for entry in OPENINGS {
            assert!(!entry.synonyms.is_empty(), "{entry:?} has no synonyms");
        }
    }
}
