/// Slugifies an opening name: lowercase, apostrophes dropped outright, any
/// other run of non-alphanumeric characters collapsed to a single `_`, and
/// leading/trailing underscores trimmed.
///
/// The output alphabet is `[a-z0-9_]`, so `slugify` is idempotent:
/// `slugify(&slugify(s)) == slugify(s)`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;

    for ch in lowered.chars() {
        if ch == '\'' || ch == '\u{2019}' {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }

    out
}
