use std::collections::BTreeMap;

use serde_json::json;

use sixty_map::{
    AliasTable, ColumnType, GateStatus, MappingEngine, MappingError, MappingSession, MatchOrigin,
    PREVIEW_ROW_LIMIT, SourceColumn, SourceRow, TargetField,
};
use sixty_standards::{BuiltinProfile, load_builtin};

fn crm_engine() -> MappingEngine {
    let targets = vec![
        TargetField::new("email", true).unwrap(),
        TargetField::optional("first_name").unwrap(),
        TargetField::optional("company_name").unwrap(),
        TargetField::optional("title").unwrap(),
    ];
    let aliases = AliasTable::from_pairs([("company", "company_name")]).unwrap();
    MappingEngine::new(targets, aliases)
}

fn columns() -> Vec<SourceColumn> {
    vec![
        SourceColumn::new("contact", "Contact", ColumnType::Text).unwrap(),
        SourceColumn::new("company", "Company", ColumnType::Text).unwrap(),
        SourceColumn::new("job_title", "Job Title", ColumnType::Text).unwrap(),
        SourceColumn::new("fit", "Fit Score", ColumnType::Formula).unwrap(),
    ]
}

#[test]
fn session_moves_between_gate_states() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    assert_eq!(
        session.status(),
        GateStatus::Unsatisfied {
            missing: vec!["email".to_string()]
        }
    );
    assert!(!session.can_submit());

    session.assign("contact", "email").unwrap();
    assert!(session.status().is_satisfiable());

    session.skip("contact").unwrap();
    assert!(!session.status().is_satisfiable());
}

#[test]
fn assign_rejects_unknown_names() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    assert_eq!(
        session.assign("contact", "phone"),
        Err(MappingError::TargetNotFound("phone".to_string()))
    );
    assert_eq!(
        session.assign("missing", "email"),
        Err(MappingError::ColumnNotFound("missing".to_string()))
    );
    assert_eq!(
        session.assign("fit", "email"),
        Err(MappingError::ColumnExcluded("fit".to_string()))
    );
}

#[test]
fn regenerate_discards_manual_edits() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    session.assign("company", "title").unwrap();
    assert_eq!(session.summary().manual, 1);

    session.regenerate();
    let company = session.mapping_for("company").unwrap();
    assert_eq!(company.target(), Some("company_name"));
    assert_eq!(company.origin, MatchOrigin::Alias);
    assert_eq!(session.summary().manual, 0);
}

#[test]
fn summary_and_duplicates() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    let summary = session.summary();
    assert_eq!(summary.eligible, 3);
    assert_eq!(summary.matched, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.excluded, 1);

    session.assign("contact", "title").unwrap();
    let duplicates = session.duplicate_targets();
    assert_eq!(
        duplicates.get("title"),
        Some(&vec!["contact".to_string(), "job_title".to_string()])
    );
}

#[test]
fn accepted_requires_gate_and_drops_skips() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    assert_eq!(
        session.accepted(),
        Err(MappingError::RequiredFieldUnmapped(vec!["email".to_string()]))
    );

    session.assign("contact", "email").unwrap();
    let accepted = session.accepted().unwrap();
    let keys: Vec<&str> = accepted
        .iter()
        .map(|m| m.source_column_key.as_str())
        .collect();
    assert_eq!(keys, vec!["contact", "company", "job_title"]);
}

#[test]
fn preview_follows_session_edits() {
    let mut session = MappingSession::start(crm_engine(), columns(), "email");
    session.assign("contact", "email").unwrap();
    let rows: Vec<SourceRow> = vec![
        BTreeMap::from([
            ("contact".to_string(), json!("ada@example.com")),
            ("company".to_string(), json!("Analytical Engines")),
            ("fit".to_string(), json!(92)),
        ]),
        BTreeMap::from([("contact".to_string(), json!("grace@example.com"))]),
    ];

    let preview = session.preview(&rows, PREVIEW_ROW_LIMIT);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].get("email"), Some(&json!("ada@example.com")));
    assert_eq!(preview[0].get("company_name"), Some(&json!("Analytical Engines")));
    assert!(!preview[0].contains_key("fit"));
    assert_eq!(preview[1].get("title"), Some(&serde_json::Value::Null));
}

#[test]
fn alternatives_rank_by_label() {
    let session = MappingSession::start(crm_engine(), columns(), "email");
    let alternatives = session.alternatives("company", 1);
    assert_eq!(alternatives.len(), 1);
    assert_eq!(alternatives[0].name, "company_name");
    assert!(session.alternatives("nope", 3).is_empty());
}

#[test]
fn instantly_session_links_campaign_columns() {
    let profile = load_builtin(BuiltinProfile::Instantly).unwrap();
    let columns = vec![
        SourceColumn::new("work_email", "Work Email", ColumnType::Email).unwrap(),
        SourceColumn::new("first_line", "Icebreaker", ColumnType::Text).unwrap(),
        SourceColumn::new("company_website", "", ColumnType::Url).unwrap(),
        SourceColumn::new("status", "Push to Instantly", ColumnType::Action).unwrap(),
    ];
    let session = profile.session(columns);
    let targets: Vec<Option<&str>> = session.mappings().iter().map(|m| m.target()).collect();
    assert_eq!(
        targets,
        vec![Some("email"), Some("personalization"), Some("website")]
    );
    assert!(session.status().is_satisfiable());
}
