//! Mapping session state for interactive mapping workflows.
//!
//! A session is created when a mapping dialog opens, edited by the user, and
//! discarded on close or after a successful submit. It is owned by a single
//! caller and never persisted.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use sixty_model::{FieldMapping, MatchOrigin, SourceColumn};

use crate::engine::{MappingEngine, MatchSummary};
use crate::error::MappingError;
use crate::gate::{GateStatus, can_submit, gate_status};
use crate::preview::{PreviewRow, SourceRow, preview};
use crate::score::{RankedTarget, ScoringEngine};

/// State of one mapping session.
#[derive(Debug, Clone)]
pub struct MappingSession {
    engine: MappingEngine,
    columns: Vec<SourceColumn>,
    required_field: String,
    mappings: Vec<FieldMapping>,
    excluded_columns: Vec<String>,
}

/// Counts shown next to the mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Columns taking part in mapping.
    pub eligible: usize,
    pub matched: usize,
    pub skipped: usize,
    /// Bound columns whose binding came from a user edit.
    pub manual: usize,
    /// Columns left out because of their type.
    pub excluded: usize,
}

impl MappingSession {
    /// Opens a session and runs the auto-matcher once.
    pub fn start(
        engine: MappingEngine,
        columns: Vec<SourceColumn>,
        required_field: impl Into<String>,
    ) -> Self {
        let result = engine.build_mappings(&columns);
        Self {
            engine,
            columns,
            required_field: required_field.into(),
            mappings: result.mappings,
            excluded_columns: result.excluded_columns,
        }
    }

    pub fn engine(&self) -> &MappingEngine {
        &self.engine
    }

    pub fn columns(&self) -> &[SourceColumn] {
        &self.columns
    }

    pub fn required_field(&self) -> &str {
        &self.required_field
    }

    /// Current mapping, one entry per eligible column in source order.
    pub fn mappings(&self) -> &[FieldMapping] {
        &self.mappings
    }

    pub fn excluded_columns(&self) -> &[String] {
        &self.excluded_columns
    }

    /// Get the mapping for a column key.
    pub fn mapping_for(&self, column_key: &str) -> Option<&FieldMapping> {
        self.mappings
            .iter()
            .find(|m| m.source_column_key == column_key)
    }

    /// Bind a column to a target field chosen by the user.
    pub fn assign(&mut self, column_key: &str, target_name: &str) -> Result<(), MappingError> {
        if self.engine.target(target_name).is_none() {
            return Err(MappingError::TargetNotFound(target_name.to_string()));
        }
        let mapping = self.mapping_mut(column_key)?;
        *mapping = FieldMapping::bound(column_key, target_name, MatchOrigin::Manual);
        debug!(column = column_key, field = target_name, "manual mapping");
        Ok(())
    }

    /// Leave a column unbound.
    pub fn skip(&mut self, column_key: &str) -> Result<(), MappingError> {
        let mapping = self.mapping_mut(column_key)?;
        *mapping = FieldMapping::unbound(column_key);
        debug!(column = column_key, "column skipped");
        Ok(())
    }

    /// Re-run the auto-matcher, discarding every manual edit.
    pub fn regenerate(&mut self) {
        let result = self.engine.build_mappings(&self.columns);
        self.mappings = result.mappings;
        self.excluded_columns = result.excluded_columns;
    }

    /// Returns true if the required field is bound.
    pub fn can_submit(&self) -> bool {
        can_submit(&self.mappings, &self.required_field)
    }

    pub fn status(&self) -> GateStatus {
        gate_status(&self.mappings, &self.required_field, self.engine.targets())
    }

    pub fn summary(&self) -> SessionSummary {
        let counts = MatchSummary::from_mappings(&self.mappings);
        SessionSummary {
            eligible: self.mappings.len(),
            matched: counts.matched,
            skipped: counts.skipped,
            manual: self
                .mappings
                .iter()
                .filter(|m| m.is_bound() && m.origin == MatchOrigin::Manual)
                .count(),
            excluded: self.excluded_columns.len(),
        }
    }

    /// Targets bound by more than one column, with the columns binding them.
    pub fn duplicate_targets(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_target: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for mapping in &self.mappings {
            if let Some(target) = mapping.target() {
                by_target
                    .entry(target.to_string())
                    .or_default()
                    .push(mapping.source_column_key.clone());
            }
        }
        by_target.retain(|_, columns| columns.len() > 1);
        by_target
    }

    /// Alternative targets for a column, closest first.
    pub fn alternatives(&self, column_key: &str, limit: usize) -> Vec<RankedTarget> {
        let Some(column) = self.columns.iter().find(|c| c.key == column_key) else {
            return Vec::new();
        };
        ScoringEngine::new(self.engine.targets().to_vec()).rank_targets(&column.label, limit)
    }

    /// Project sample rows through the current mapping.
    pub fn preview(&self, rows: &[SourceRow], limit: usize) -> Vec<PreviewRow> {
        preview(&self.mappings, rows, limit)
    }

    /// Bound mappings to send downstream.
    ///
    /// Fails while any required field is unbound.
    pub fn accepted(&self) -> Result<Vec<FieldMapping>, MappingError> {
        if let GateStatus::Unsatisfied { missing } = self.status() {
            return Err(MappingError::RequiredFieldUnmapped(missing));
        }
        Ok(self
            .mappings
            .iter()
            .filter(|m| m.is_bound())
            .cloned()
            .collect())
    }

    fn mapping_mut(&mut self, column_key: &str) -> Result<&mut FieldMapping, MappingError> {
        if self.excluded_columns.iter().any(|c| c == column_key) {
            return Err(MappingError::ColumnExcluded(column_key.to_string()));
        }
        self.mappings
            .iter_mut()
            .find(|m| m.source_column_key == column_key)
            .ok_or_else(|| MappingError::ColumnNotFound(column_key.to_string()))
    }
}
