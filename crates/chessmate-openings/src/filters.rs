use crate::catalogue::OPENINGS;

/// Derives opening/ECO-range filter pairs from free text (e.g. a search
/// query or a PGN comment), by substring-matching each catalogue entry's
/// synonyms against `cleaned`.
///
/// `cleaned` is expected to already be lowercased by the caller; this
/// function does not normalize case itself so repeated calls over an
/// already-lowercased corpus avoid re-lowering it per entry.
///
/// Returns `("opening", slug)` and `("eco_range", "X-Y")` (or `"X"` when
/// the range is a single code) pairs, deduplicated and sorted by
/// `(field, value)`.
#[must_use]
pub fn filters_for_text(cleaned: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    for entry in OPENINGS {
        let matched = entry.synonyms.iter().any(|syn| cleaned.contains(syn));
        if !matched {
            continue;
        }
        pairs.push(("opening".to_string(), entry.slug.to_string()));
        let range = if entry.eco_start == entry.eco_end {
            entry.eco_start.to_string()
        } else {
            format!("{}-{}", entry.eco_start, entry.eco_end)
        };
        pairs.push(("eco_range".to_string(), range));
    }

    pairs.sort();
    pairs.dedup();
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_a_synonym_and_emits_both_filter_kinds() {
        let filters = filters_for_text("analysis of the sicilian defense, najdorf line");
        assert!(filters.contains(&("opening".to_string(), "sicilian_defense".to_string())));
        assert!(filters.contains(&("eco_range".to_string(), "B20-B99".to_string())));
    }

    #[test]
    fn single_code_range_emits_a_bare_eco_value() {
        let filters = filters_for_text("the scandinavian defense is underrated");
        assert!(filters.contains(&("eco_range".to_string(), "B01".to_string())));
    }

    #[test]
    fn deduplicates_when_multiple_synonyms_match_the_same_entry() {
        let filters = filters_for_text("ruy lopez, also called the spanish opening");
        let opening_count = filters.iter().filter(|(field, _)| field == "opening").count();
        assert_eq!(opening_count, 1);
    }

    #[test]
    fn no_match_returns_an_empty_list() {
        assert!(filters_for_text("a quiet positional squeeze with no opening mentioned").is_empty());
    }

    #[test]
    fn results_are_sorted_by_field_then_value() {
        let filters = filters_for_text("this game transposed from a french defense into a caro-kann");
        let mut sorted = filters.clone();
        sorted.sort();
        assert_eq!(filters, sorted);
    }
}
