//! Projects sample source rows through a mapping.

use std::collections::BTreeMap;

use serde_json::Value;
use sixty_model::FieldMapping;

/// Rows shown for user confirmation before a push.
pub const PREVIEW_ROW_LIMIT: usize = 3;

/// Source row keyed by column key.
pub type SourceRow = BTreeMap<String, Value>;

/// Projected row keyed by target field name.
pub type PreviewRow = BTreeMap<String, Value>;

/// Projects the first `limit` rows onto target field names.
///
/// Skipped columns are dropped. Missing cells become `null`. When several
/// columns bind the same target, the earliest column wins.
pub fn preview(mappings: &[FieldMapping], rows: &[SourceRow], limit: usize) -> Vec<PreviewRow> {
    rows.iter()
        .take(limit)
        .map(|row| {
            let mut projected = PreviewRow::new();
            for mapping in mappings {
                let Some(target) = mapping.target() else {
                    continue;
                };
                if projected.contains_key(target) {
                    continue;
                }
                let value = row
                    .get(&mapping.source_column_key)
                    .cloned()
                    .unwrap_or(Value::Null);
                projected.insert(target.to_string(), value);
            }
            projected
        })
        .collect()
}
