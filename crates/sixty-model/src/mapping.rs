use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal used downstream for an unbound column.
pub const SKIP: &str = "skip";

/// Where a source column is sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MappingTarget {
    Field(String),
    Skip,
}

impl MappingTarget {
    pub fn field_name(&self) -> Option<&str> {
        match self {
            MappingTarget::Field(name) => Some(name.as_str()),
            MappingTarget::Skip => None,
        }
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, MappingTarget::Skip)
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingTarget::Field(name) => f.write_str(name),
            MappingTarget::Skip => f.write_str(SKIP),
        }
    }
}

impl From<String> for MappingTarget {
    fn from(value: String) -> Self {
        if value == SKIP || value.is_empty() {
            MappingTarget::Skip
        } else {
            MappingTarget::Field(value)
        }
    }
}

impl From<MappingTarget> for String {
    fn from(value: MappingTarget) -> Self {
        value.to_string()
    }
}

/// How a mapping entry was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOrigin {
    /// Exact hit in the integration's alias table.
    Alias,
    /// Substring containment against a target name or key.
    Fuzzy,
    /// Set by the user after auto-matching.
    Manual,
    /// Nothing matched.
    #[default]
    #[serde(rename = "none")]
    Unmatched,
}

impl MatchOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOrigin::Alias => "alias",
            MatchOrigin::Fuzzy => "fuzzy",
            MatchOrigin::Manual => "manual",
            MatchOrigin::Unmatched => "none",
        }
    }
}

impl fmt::Display for MatchOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source column's binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    pub source_column_key: String,
    pub target_field_name: MappingTarget,
    #[serde(default)]
    pub origin: MatchOrigin,
}

impl FieldMapping {
    pub fn bound(
        source_column_key: impl Into<String>,
        target_field_name: impl Into<String>,
        origin: MatchOrigin,
    ) -> Self {
        Self {
            source_column_key: source_column_key.into(),
            target_field_name: MappingTarget::Field(target_field_name.into()),
            origin,
        }
    }

    pub fn unbound(source_column_key: impl Into<String>) -> Self {
        Self {
            source_column_key: source_column_key.into(),
            target_field_name: MappingTarget::Skip,
            origin: MatchOrigin::Unmatched,
        }
    }

    pub fn is_bound(&self) -> bool {
        !self.target_field_name.is_skip()
    }

    pub fn target(&self) -> Option<&str> {
        self.target_field_name.field_name()
    }
}
