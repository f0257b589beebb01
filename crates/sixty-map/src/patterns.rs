//! Exact-rule and substring matchers.

use sixty_model::{AliasTable, TargetField};

use crate::utils::normalize;

/// Looks up a normalized source key in an alias table.
///
/// Aliases are normalized before comparison. When several aliases normalize
/// to the same key, the first entry in table order wins.
pub fn match_exact<'a>(normalized_key: &str, aliases: &'a AliasTable) -> Option<&'a str> {
    if normalized_key.is_empty() {
        return None;
    }
    aliases
        .entries()
        .iter()
        .find(|entry| normalize(&entry.alias) == normalized_key)
        .map(|entry| entry.target.as_str())
}

/// Finds the first target whose normalized name or key contains the source
/// key, or is contained by it.
///
/// Targets are tried in the order given. An empty source key matches
/// nothing, and empty target forms are ignored.
pub fn match_fuzzy<'a>(
    normalized_key: &str,
    targets: &'a [TargetField],
) -> Option<&'a TargetField> {
    if normalized_key.is_empty() {
        return None;
    }
    targets.iter().find(|target| {
        target_patterns(target).iter().any(|pattern| {
            pattern.contains(normalized_key) || normalized_key.contains(pattern.as_str())
        })
    })
}

/// Normalized comparison forms for a target: its name, then its key.
pub fn target_patterns(target: &TargetField) -> Vec<String> {
    let mut patterns = Vec::with_capacity(2);
    let name = normalize(&target.name);
    if !name.is_empty() {
        patterns.push(name);
    }
    if let Some(key) = target.key.as_deref() {
        let key = normalize(key);
        if !key.is_empty() && !patterns.contains(&key) {
            patterns.push(key);
        }
    }
    patterns
}
