use chessmate_openings::slugify;

/// A single `field=value` metadata filter, as supplied by the caller before
/// whitelisting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Optional rating bounds applied alongside the metadata filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingFilter {
    pub white_min: Option<i32>,
    pub black_min: Option<i32>,
    pub max_rating_delta: Option<i32>,
}

/// A single bound parameter value, positionally tied to the `$n`
/// placeholder emitted alongside it in `conditions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParam {
    Text(String),
    Int(i32),
}

/// Builds whitelisted, parameterized SQL conditions for
/// [`crate::repository::Repository::search_games`].
///
/// Unknown fields are dropped silently (zero conditions, zero params).
/// Every known field's value is trimmed and case-normalized (lowercased,
/// except `eco` which is uppercased) before being pushed into `params` —
/// never concatenated into the condition text itself. Placeholders are
/// numbered `$start_index..`, and the next free index is returned so
/// callers can chain additional conditions (e.g. the rating bounds, or a
/// caller-supplied `LIMIT` parameter).
#[must_use]
pub fn build_conditions(
    filters: &[FieldFilter],
    rating: &RatingFilter,
    start_index: usize,
) -> (Vec<String>, Vec<FilterParam>, usize) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();
    let mut index = start_index;

    for filter in filters {
        let Some((condition, param)) = whitelisted_condition(&filter.field, &filter.value, index) else {
            continue;
        };
        conditions.push(condition);
        params.push(param);
        index += 1;
    }

    if let Some(min) = rating.white_min {
        conditions.push(format!("w.rating >= ${index}"));
        params.push(FilterParam::Int(min));
        index += 1;
    }
    if let Some(min) = rating.black_min {
        conditions.push(format!("b.rating >= ${index}"));
        params.push(FilterParam::Int(min));
        index += 1;
    }
    if let Some(delta) = rating.max_rating_delta {
        conditions.push(format!("ABS(w.rating - b.rating) <= ${index}"));
        params.push(FilterParam::Int(delta));
        index += 1;
    }

    (conditions, params, index)
}

fn whitelisted_condition(field: &str, value: &str, index: usize) -> Option<(String, FilterParam)> {
    let trimmed = value.trim();
    match field.to_lowercase().as_str() {
        "opening" => Some((
            format!("LOWER(g.opening_slug) LIKE ${index} || '%'"),
            FilterParam::Text(slugify(trimmed)),
        )),
        "white" => Some((
            format!("LOWER(w.name) LIKE '%' || ${index} || '%'"),
            FilterParam::Text(trimmed.to_lowercase()),
        )),
        "black" => Some((
            format!("LOWER(b.name) LIKE '%' || ${index} || '%'"),
            FilterParam::Text(trimmed.to_lowercase()),
        )),
        "event" => Some((
            format!("LOWER(g.event) LIKE '%' || ${index} || '%'"),
            FilterParam::Text(trimmed.to_lowercase()),
        )),
        "eco" => Some((
            format!("g.eco_code = ${index}"),
            FilterParam::Text(trimmed.to_uppercase()),
        )),
        _ => None,
    }
}
