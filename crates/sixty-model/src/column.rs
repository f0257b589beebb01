//! Source column descriptors.
//!
//! Columns are read from the host table's schema (an ops table or a
//! prospecting result set) and stay immutable for a mapping session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ModelError, Result};

/// Data type of a source column.
///
/// Computed types (`Enrichment`, `Formula`, `Integration`, `Action`) hold
/// derived values rather than raw importable data. Unknown type strings are
/// preserved as [`ColumnType::Other`].
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum ColumnType {
    #[default]
    Text,
    Email,
    Url,
    Number,
    Date,
    Boolean,
    Phone,
    Person,
    Company,
    Enrichment,
    Formula,
    Integration,
    Action,
    Other(String),
}

impl ColumnType {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Email => "email",
            ColumnType::Url => "url",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::Phone => "phone",
            ColumnType::Person => "person",
            ColumnType::Company => "company",
            ColumnType::Enrichment => "enrichment",
            ColumnType::Formula => "formula",
            ColumnType::Integration => "integration",
            ColumnType::Action => "action",
            ColumnType::Other(name) => name.as_str(),
        }
    }

    /// Returns true for types whose values are derived by the table itself.
    pub fn is_computed(&self) -> bool {
        matches!(
            self,
            ColumnType::Enrichment
                | ColumnType::Formula
                | ColumnType::Integration
                | ColumnType::Action
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = std::convert::Infallible;

    /// Case-insensitive; unknown names become [`ColumnType::Other`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "" | "text" | "string" => ColumnType::Text,
            "email" => ColumnType::Email,
            "url" | "link" => ColumnType::Url,
            "number" | "numeric" | "integer" => ColumnType::Number,
            "date" | "datetime" => ColumnType::Date,
            "boolean" | "checkbox" => ColumnType::Boolean,
            "phone" => ColumnType::Phone,
            "person" => ColumnType::Person,
            "company" => ColumnType::Company,
            "enrichment" => ColumnType::Enrichment,
            "formula" => ColumnType::Formula,
            "integration" => ColumnType::Integration,
            "action" => ColumnType::Action,
            _ => ColumnType::Other(normalized),
        })
    }
}

impl From<String> for ColumnType {
    fn from(value: String) -> Self {
        let Ok(column_type) = value.parse::<ColumnType>();
        column_type
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.as_str().to_string()
    }
}

/// A column of the source table.
///
/// Deserialization goes through [`SourceColumn::new`]: an empty key is an
/// error and a missing label falls back to the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSourceColumn")]
pub struct SourceColumn {
    /// Machine key of the column.
    pub key: String,
    /// Human-entered label shown in the table header.
    pub label: String,
    pub column_type: ColumnType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSourceColumn {
    key: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    column_type: ColumnType,
}

impl TryFrom<RawSourceColumn> for SourceColumn {
    type Error = ModelError;

    fn try_from(raw: RawSourceColumn) -> Result<Self> {
        SourceColumn::new(raw.key, raw.label, raw.column_type)
    }
}

impl SourceColumn {
    /// Create a column; an empty label falls back to the key.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        column_type: ColumnType,
    ) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ModelError::EmptyColumnKey);
        }
        let mut label = label.into();
        if label.trim().is_empty() {
            label = key.clone();
        }
        Ok(Self {
            key,
            label,
            column_type,
        })
    }

    /// Text column whose label equals its key.
    pub fn text(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        Self::new(key.clone(), key, ColumnType::Text)
    }
}
