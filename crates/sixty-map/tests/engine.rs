use proptest::prelude::*;

use sixty_map::{
    AliasTable, ColumnType, MappingEngine, MappingResult, MatchOrigin, SourceColumn, TargetField,
    build_mappings, can_submit, normalize,
};

fn text_columns(keys: &[&str]) -> Vec<SourceColumn> {
    keys.iter()
        .map(|key| SourceColumn::text(*key).unwrap())
        .collect()
}

fn fields(names: &[&str]) -> Vec<TargetField> {
    names
        .iter()
        .map(|name| TargetField::optional(*name).unwrap())
        .collect()
}

fn render(result: &MappingResult) -> String {
    result
        .mappings
        .iter()
        .map(|m| format!("{} -> {} ({})", m.source_column_key, m.target_field_name, m.origin))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn campaign_push_scenario() {
    let aliases =
        AliasTable::from_pairs([("email_address", "email"), ("company", "company_name")]).unwrap();
    let targets = fields(&["email", "company_name", "title"]);
    let columns = text_columns(&["email_address", "company", "job_title"]);

    let result = build_mappings(&columns, &targets, &aliases);

    insta::assert_snapshot!(render(&result), @r"
    email_address -> email (alias)
    company -> company_name (alias)
    job_title -> title (fuzzy)
    ");
    assert_eq!(result.summary.matched, 3);
    assert_eq!(result.summary.skipped, 0);
    assert!(can_submit(&result.mappings, "email"));
}

#[test]
fn exact_alias_wins_over_fuzzy_candidate() {
    let aliases = AliasTable::from_pairs([("email_address", "email")]).unwrap();
    let targets = fields(&["email_address_backup", "email"]);
    let result = build_mappings(&text_columns(&["email_address"]), &targets, &aliases);

    assert_eq!(result.mappings[0].target(), Some("email"));
    assert_eq!(result.mappings[0].origin, MatchOrigin::Alias);
}

#[test]
fn empty_inputs_produce_empty_or_skipped_mappings() {
    let empty = build_mappings(&[], &fields(&["email"]), &AliasTable::empty());
    assert!(empty.mappings.is_empty());
    assert_eq!(empty.summary.total(), 0);

    let no_targets = build_mappings(
        &text_columns(&["email", "phone"]),
        &[],
        &AliasTable::empty(),
    );
    assert_eq!(no_targets.mappings.len(), 2);
    assert!(no_targets.mappings.iter().all(|m| !m.is_bound()));
    assert!(!can_submit(&no_targets.mappings, "email"));
}

#[test]
fn enrichment_column_is_never_bound() {
    let columns = vec![
        SourceColumn::new("email", "Email", ColumnType::Enrichment).unwrap(),
        SourceColumn::new("work_email", "Work Email", ColumnType::Email).unwrap(),
    ];
    let result = build_mappings(&columns, &fields(&["email"]), &AliasTable::empty());

    assert!(
        result
            .mappings
            .iter()
            .all(|m| m.source_column_key != "email")
    );
    assert_eq!(result.excluded_columns, vec!["email".to_string()]);
    assert_eq!(result.mappings[0].target(), Some("email"));
}

#[test]
fn unmatched_columns_are_skipped() {
    let result = build_mappings(
        &text_columns(&["deal_stage", "---"]),
        &fields(&["email", "first_name"]),
        &AliasTable::empty(),
    );
    assert_eq!(result.summary.matched, 0);
    assert_eq!(result.summary.skipped, 2);
    assert!(result.mappings.iter().all(|m| m.origin == MatchOrigin::Unmatched));
}

fn column_type() -> impl Strategy<Value = ColumnType> {
    prop::sample::select(vec![
        ColumnType::Text,
        ColumnType::Email,
        ColumnType::Url,
        ColumnType::Number,
        ColumnType::Enrichment,
        ColumnType::Formula,
        ColumnType::Integration,
        ColumnType::Action,
    ])
}

fn source_columns() -> impl Strategy<Value = Vec<SourceColumn>> {
    prop::collection::vec(
        ("[A-Za-z_ -]{1,14}", "[A-Za-z ]{0,14}", column_type()).prop_map(
            |(key, label, column_type)| SourceColumn {
                key,
                label,
                column_type,
            },
        ),
        0..12,
    )
}

fn engine() -> MappingEngine {
    let aliases = AliasTable::from_pairs([
        ("email_address", "email"),
        ("company", "company_name"),
        ("fname", "first_name"),
    ])
    .unwrap();
    MappingEngine::new(
        fields(&["email", "first_name", "company_name", "title", "phone"]),
        aliases,
    )
}

proptest! {
    #[test]
    fn normalize_is_idempotent(name in ".{0,40}") {
        let once = normalize(&name);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert!(once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn one_mapping_per_eligible_column(columns in source_columns()) {
        let engine = engine();
        let result = engine.build_mappings(&columns);
        let eligible = columns
            .iter()
            .filter(|c| !c.column_type.is_computed())
            .count();

        prop_assert_eq!(result.mappings.len(), eligible);
        prop_assert_eq!(result.summary.matched + result.summary.skipped, eligible);
        prop_assert_eq!(result.excluded_columns.len(), columns.len() - eligible);
        for mapping in &result.mappings {
            if let Some(target) = mapping.target() {
                prop_assert!(engine.target(target).is_some());
            }
        }
    }

    #[test]
    fn mapping_is_deterministic(columns in source_columns()) {
        let engine = engine();
        prop_assert_eq!(engine.build_mappings(&columns), engine.build_mappings(&columns));
    }
}
