//! Name normalization.

/// Produces the comparison key for a column or field name.
///
/// Lowercases and drops every character outside `[a-z0-9]`, so spacing,
/// punctuation and casing differences collapse. Idempotent.
pub fn normalize(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}
