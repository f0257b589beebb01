//! Integration profiles: one destination's vocabulary plus its alias table.

use std::fmt;
use std::str::FromStr;

use sixty_map::{ExclusionRule, MappingEngine, MappingSession};
use sixty_model::{AliasTable, ColumnType, SourceColumn, TargetField};

use crate::error::StandardsError;

/// Field most push and import surfaces require.
pub const DEFAULT_REQUIRED_FIELD: &str = "email";

/// Integrations shipped with embedded vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinProfile {
    /// CRM contact push.
    HubSpot,
    /// Campaign lead push.
    Instantly,
}

impl BuiltinProfile {
    pub const ALL: [BuiltinProfile; 2] = [BuiltinProfile::HubSpot, BuiltinProfile::Instantly];

    pub fn id(&self) -> &'static str {
        match self {
            BuiltinProfile::HubSpot => "hubspot",
            BuiltinProfile::Instantly => "instantly",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinProfile::HubSpot => "HubSpot",
            BuiltinProfile::Instantly => "Instantly",
        }
    }
}

impl fmt::Display for BuiltinProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BuiltinProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hubspot" => Ok(BuiltinProfile::HubSpot),
            "instantly" => Ok(BuiltinProfile::Instantly),
            other => Err(format!("unknown built-in profile: {other}")),
        }
    }
}

/// A destination integration's mapping configuration.
#[derive(Debug, Clone)]
pub struct IntegrationProfile {
    pub id: String,
    pub name: String,
    /// Field the submit gate requires.
    pub required_field: String,
    pub targets: Vec<TargetField>,
    pub aliases: AliasTable,
    /// Column types never auto-mapped; `None` uses the default rule.
    pub excluded_types: Option<Vec<ColumnType>>,
}

impl IntegrationProfile {
    /// Cross-op-table import: the destination vocabulary is the target
    /// table's data columns, with no alias table.
    ///
    /// Fails when a column key cannot name a field (for example `skip`) or
    /// when two columns share a key.
    pub fn ops_table(
        table_name: &str,
        columns: &[SourceColumn],
        required_field: &str,
    ) -> Result<Self, StandardsError> {
        let exclusions = ExclusionRule::default();
        let mut targets: Vec<TargetField> = Vec::with_capacity(columns.len());
        for column in columns.iter().filter(|c| !exclusions.excludes(&c.column_type)) {
            if targets.iter().any(|t| t.name == column.key) {
                return Err(StandardsError::invalid(
                    table_name,
                    format!("duplicate column '{}'", column.key),
                ));
            }
            let target = TargetField::new(column.key.clone(), column.key == required_field)?
                .with_label(column.label.clone());
            targets.push(target);
        }
        Ok(Self {
            id: format!("ops:{table_name}"),
            name: table_name.to_string(),
            required_field: required_field.to_string(),
            targets,
            aliases: AliasTable::empty(),
            excluded_types: None,
        })
    }

    /// Makes `field` the only required field.
    ///
    /// Every other field loses its `required` flag, so the gate asks for
    /// `field` alone.
    pub fn with_required_field(mut self, field: &str) -> Result<Self, StandardsError> {
        if !self.targets.iter().any(|t| t.name == field) {
            return Err(StandardsError::invalid(
                &self.id,
                format!("required field '{field}' is not one of the profile's fields"),
            ));
        }
        for target in &mut self.targets {
            target.required = target.name == field;
        }
        self.required_field = field.to_string();
        Ok(self)
    }

    pub fn exclusion_rule(&self) -> ExclusionRule {
        match &self.excluded_types {
            Some(types) => ExclusionRule::new(types.iter().cloned()),
            None => ExclusionRule::default(),
        }
    }

    /// Engine configured with this profile's vocabulary and aliases.
    pub fn engine(&self) -> MappingEngine {
        MappingEngine::new(self.targets.clone(), self.aliases.clone())
            .with_exclusions(self.exclusion_rule())
    }

    /// Opens a mapping session gated on this profile's required field.
    pub fn session(&self, columns: Vec<SourceColumn>) -> MappingSession {
        MappingSession::start(self.engine(), columns, self.required_field.clone())
    }
}
