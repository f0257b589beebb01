//! Mapping engine implementation.

use std::collections::BTreeSet;

use tracing::{debug, info};

use sixty_model::{AliasTable, ColumnType, FieldMapping, MatchOrigin, SourceColumn, TargetField};

use crate::patterns::{match_exact, match_fuzzy};
use crate::utils::normalize;

/// Column types that are never auto-mapped.
///
/// The default rule excludes the computed types (`enrichment`, `formula`,
/// `integration`, `action`), which hold derived values rather than
/// importable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    excluded: BTreeSet<ColumnType>,
}

impl Default for ExclusionRule {
    fn default() -> Self {
        Self::new([
            ColumnType::Enrichment,
            ColumnType::Formula,
            ColumnType::Integration,
            ColumnType::Action,
        ])
    }
}

impl ExclusionRule {
    pub fn new(types: impl IntoIterator<Item = ColumnType>) -> Self {
        Self {
            excluded: types.into_iter().collect(),
        }
    }

    /// Rule that excludes nothing.
    pub fn none() -> Self {
        Self::new([])
    }

    #[must_use]
    pub fn with(mut self, column_type: ColumnType) -> Self {
        self.excluded.insert(column_type);
        self
    }

    pub fn excludes(&self, column_type: &ColumnType) -> bool {
        self.excluded.contains(column_type)
    }

    pub fn types(&self) -> impl Iterator<Item = &ColumnType> {
        self.excluded.iter()
    }
}

/// Matched/skipped counts over the eligible columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchSummary {
    pub matched: usize,
    pub skipped: usize,
}

impl MatchSummary {
    pub fn from_mappings(mappings: &[FieldMapping]) -> Self {
        let matched = mappings.iter().filter(|m| m.is_bound()).count();
        Self {
            matched,
            skipped: mappings.len() - matched,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.skipped
    }
}

/// Result of a mapping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingResult {
    /// One entry per eligible source column, in source order.
    pub mappings: Vec<FieldMapping>,
    /// Keys of columns skipped because of their type.
    pub excluded_columns: Vec<String>,
    pub summary: MatchSummary,
}

/// Engine for mapping source columns onto one destination's vocabulary.
///
/// Each column is resolved by, in order: an alias hit on its key, an alias
/// hit on its label, substring containment on its key, substring
/// containment on its label. The first rule that produces a target wins;
/// otherwise the column is left as `skip`. Alias hits only bind when the
/// aliased name is part of the target vocabulary.
///
/// # Example
///
/// ```ignore
/// use sixty_map::{AliasTable, MappingEngine};
///
/// let engine = MappingEngine::new(targets, AliasTable::empty());
/// let result = engine.build_mappings(&columns);
/// ```
#[derive(Debug, Clone)]
pub struct MappingEngine {
    targets: Vec<TargetField>,
    aliases: AliasTable,
    exclusions: ExclusionRule,
}

impl MappingEngine {
    /// Creates an engine with the default exclusion rule.
    pub fn new(targets: Vec<TargetField>, aliases: AliasTable) -> Self {
        Self {
            targets,
            aliases,
            exclusions: ExclusionRule::default(),
        }
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionRule) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn targets(&self) -> &[TargetField] {
        &self.targets
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn exclusions(&self) -> &ExclusionRule {
        &self.exclusions
    }

    /// Finds a target field by exact name.
    pub fn target(&self, name: &str) -> Option<&TargetField> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Returns true if the column takes part in mapping.
    pub fn is_eligible(&self, column: &SourceColumn) -> bool {
        !self.exclusions.excludes(&column.column_type)
    }

    /// Maps every eligible column. Never fails.
    pub fn build_mappings(&self, columns: &[SourceColumn]) -> MappingResult {
        let mut mappings = Vec::with_capacity(columns.len());
        let mut excluded_columns = Vec::new();

        for column in columns {
            if !self.is_eligible(column) {
                debug!(
                    column = %column.key,
                    column_type = %column.column_type,
                    "column excluded from auto-mapping"
                );
                excluded_columns.push(column.key.clone());
                continue;
            }
            let mapping = self.map_column(column);
            debug!(
                column = %column.key,
                field = %mapping.target_field_name,
                origin = %mapping.origin,
                "column mapped"
            );
            mappings.push(mapping);
        }

        let summary = MatchSummary::from_mappings(&mappings);
        info!(
            matched = summary.matched,
            skipped = summary.skipped,
            excluded = excluded_columns.len(),
            "auto-mapping complete"
        );
        MappingResult {
            mappings,
            excluded_columns,
            summary,
        }
    }

    /// Resolves a single column, ignoring the exclusion rule.
    pub fn map_column(&self, column: &SourceColumn) -> FieldMapping {
        let keys = candidate_keys(column);

        for key in &keys {
            if let Some(target) = self.alias_override(key) {
                return FieldMapping::bound(&column.key, target, MatchOrigin::Alias);
            }
        }
        for key in &keys {
            if let Some(target) = match_fuzzy(key, &self.targets) {
                return FieldMapping::bound(&column.key, &target.name, MatchOrigin::Fuzzy);
            }
        }
        FieldMapping::unbound(&column.key)
    }

    fn alias_override(&self, normalized_key: &str) -> Option<&str> {
        let target = match_exact(normalized_key, &self.aliases)?;
        if self.target(target).is_none() {
            debug!(
                key = normalized_key,
                alias_target = target,
                "alias target is not part of the vocabulary"
            );
            return None;
        }
        Some(target)
    }
}

/// Normalized forms of a column's key and label, key first, deduplicated.
fn candidate_keys(column: &SourceColumn) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    let key = normalize(&column.key);
    if !key.is_empty() {
        keys.push(key);
    }
    let label = normalize(&column.label);
    if !label.is_empty() && !keys.contains(&label) {
        keys.push(label);
    }
    keys
}

/// Maps columns with the default exclusion rule.
pub fn build_mappings(
    columns: &[SourceColumn],
    targets: &[TargetField],
    aliases: &AliasTable,
) -> MappingResult {
    MappingEngine::new(targets.to_vec(), aliases.clone()).build_mappings(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(key: &str, column_type: ColumnType) -> SourceColumn {
        SourceColumn::new(key, key, column_type).unwrap()
    }

    fn fields(names: &[&str]) -> Vec<TargetField> {
        names
            .iter()
            .map(|name| TargetField::optional(*name).unwrap())
            .collect()
    }

    #[test]
    fn exact_match_beats_fuzzy() {
        let aliases = AliasTable::from_pairs([("email_address", "email")]).unwrap();
        let engine = MappingEngine::new(fields(&["email_address_backup", "email"]), aliases);
        let mapping = engine.map_column(&column("email_address", ColumnType::Email));
        assert_eq!(mapping.target(), Some("email"));
        assert_eq!(mapping.origin, MatchOrigin::Alias);
    }

    #[test]
    fn alias_outside_vocabulary_falls_through() {
        let aliases = AliasTable::from_pairs([("work_email", "primary_email")]).unwrap();
        let engine = MappingEngine::new(fields(&["email"]), aliases);
        let mapping = engine.map_column(&column("work_email", ColumnType::Email));
        assert_eq!(mapping.target(), Some("email"));
        assert_eq!(mapping.origin, MatchOrigin::Fuzzy);
    }

    #[test]
    fn label_is_tried_after_key() {
        let aliases = AliasTable::from_pairs([("Given Name", "first_name")]).unwrap();
        let engine = MappingEngine::new(fields(&["first_name"]), aliases);
        let column = SourceColumn::new("col_7", "Given Name", ColumnType::Text).unwrap();
        let mapping = engine.map_column(&column);
        assert_eq!(mapping.target(), Some("first_name"));
        assert_eq!(mapping.origin, MatchOrigin::Alias);
    }

    #[test]
    fn label_alias_beats_key_fuzzy() {
        let aliases = AliasTable::from_pairs([("Organization", "company_name")]).unwrap();
        let engine = MappingEngine::new(fields(&["name", "company_name"]), aliases);
        let column = SourceColumn::new("org_name", "Organization", ColumnType::Text).unwrap();
        assert_eq!(engine.map_column(&column).target(), Some("company_name"));
    }

    #[test]
    fn excluded_types_are_reported_not_mapped() {
        let engine = MappingEngine::new(fields(&["email"]), AliasTable::empty());
        let result = engine.build_mappings(&[
            column("email", ColumnType::Email),
            column("email_enriched", ColumnType::Enrichment),
        ]);
        assert_eq!(result.mappings.len(), 1);
        assert_eq!(result.excluded_columns, vec!["email_enriched".to_string()]);
    }

    #[test]
    fn custom_exclusion_rule() {
        let engine = MappingEngine::new(fields(&["notes"]), AliasTable::empty())
            .with_exclusions(ExclusionRule::none().with(ColumnType::Url));
        let result = engine.build_mappings(&[
            column("notes_formula", ColumnType::Formula),
            column("notes_url", ColumnType::Url),
        ]);
        assert_eq!(result.mappings.len(), 1);
        assert_eq!(result.mappings[0].target(), Some("notes"));
        assert_eq!(result.excluded_columns, vec!["notes_url".to_string()]);
    }

    #[test]
    fn summary_counts_match_length() {
        let result = build_mappings(
            &[
                column("email", ColumnType::Email),
                column("favourite_colour", ColumnType::Text),
            ],
            &fields(&["email"]),
            &AliasTable::empty(),
        );
        assert_eq!(result.summary, MatchSummary { matched: 1, skipped: 1 });
        assert_eq!(result.summary.total(), result.mappings.len());
    }
}
