/// Normalizes a PGN `Date` tag value (`"YYYY.MM.DD"`, possibly with `??`
/// components) into `"YYYY-MM-DD"`, replacing unknown month/day
/// components with `01`. Returns `None` if the year itself is unknown or
/// the value isn't in the expected three-component form.
#[must_use]
pub fn normalize_date(raw: &str) -> Option<String> {
    let parts: Vec<&str> = raw.trim().split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let year = parts[0];
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let month = normalize_component(parts[1]);
    let day = normalize_component(parts[2]);
    Some(format!("{year}-{month}-{day}"))
}

fn normalize_component(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<u32>() {
        Ok(value) if (1..=31).contains(&value) => format!("{value:02}"),
        _ => "01".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_a_fully_known_date() {
        assert_eq!(normalize_date("2023.05.17"), Some("2023-05-17".to_string()));
    }

    #[test]
    fn replaces_unknown_month_and_day_with_01() {
        assert_eq!(normalize_date("2023.??.??"), Some("2023-01-01".to_string()));
        assert_eq!(normalize_date("2023.06.??"), Some("2023-06-01".to_string()));
    }

    #[test]
    fn discards_a_date_with_unknown_year() {
        assert_eq!(normalize_date("????.05.17"), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(normalize_date("not a date"), None);
        assert_eq!(normalize_date("2023.05"), None);
    }
}
