//! Mapping report printed by the `map` command.

use std::collections::BTreeMap;

use serde::Serialize;

use sixty_map::{
    FieldMapping, GateStatus, MappingSession, PreviewRow, RankedTarget, SessionSummary, SourceRow,
};

/// Submit readiness as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Satisfiable,
    Unsatisfied,
}

/// Everything the `map` command prints, in JSON or as tables.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapReport {
    pub profile: String,
    pub required_field: String,
    pub mappings: Vec<FieldMapping>,
    pub summary: SessionSummary,
    pub excluded_columns: Vec<String>,
    pub status: ReportStatus,
    pub missing_required: Vec<String>,
    pub duplicate_targets: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub alternatives: BTreeMap<String, Vec<RankedTarget>>,
    pub preview: Vec<PreviewRow>,
}

impl MapReport {
    /// Snapshot a session.
    ///
    /// `alternatives` ranks candidate fields for each skipped column; zero
    /// leaves the section out.
    pub fn from_session(
        profile: &str,
        session: &MappingSession,
        rows: &[SourceRow],
        preview_rows: usize,
        alternatives: usize,
    ) -> Self {
        let status = session.status();
        let mut ranked = BTreeMap::new();
        if alternatives > 0 {
            for mapping in session.mappings().iter().filter(|m| !m.is_bound()) {
                let options = session.alternatives(&mapping.source_column_key, alternatives);
                if !options.is_empty() {
                    ranked.insert(mapping.source_column_key.clone(), options);
                }
            }
        }
        Self {
            profile: profile.to_string(),
            required_field: session.required_field().to_string(),
            mappings: session.mappings().to_vec(),
            summary: session.summary(),
            excluded_columns: session.excluded_columns().to_vec(),
            status: match status {
                GateStatus::Satisfiable => ReportStatus::Satisfiable,
                GateStatus::Unsatisfied { .. } => ReportStatus::Unsatisfied,
            },
            missing_required: status.missing().to_vec(),
            duplicate_targets: session.duplicate_targets(),
            alternatives: ranked,
            preview: session.preview(rows, preview_rows),
        }
    }

    /// True when the mapping may be submitted.
    pub fn ready(&self) -> bool {
        self.status == ReportStatus::Satisfiable
    }
}
