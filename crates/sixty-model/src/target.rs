use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::mapping::SKIP;

/// A field in the destination integration's vocabulary.
///
/// Deserialization goes through [`TargetField::new`], so profile files get
/// the same name checks as code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTargetField")]
pub struct TargetField {
    /// Canonical field name sent downstream.
    pub name: String,
    /// True if a push cannot proceed without this field.
    #[serde(default)]
    pub required: bool,
    /// Destination-internal property key, when it differs from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Deserialize)]
struct RawTargetField {
    name: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawTargetField> for TargetField {
    type Error = ModelError;

    fn try_from(raw: RawTargetField) -> Result<Self> {
        let mut field = TargetField::new(raw.name, raw.required)?;
        if let Some(key) = raw.key {
            field = field.with_key(key);
        }
        if let Some(label) = raw.label {
            field = field.with_label(label);
        }
        Ok(field)
    }
}

impl TargetField {
    /// Create a field. Blank names and the `skip` literal are rejected.
    pub fn new(name: impl Into<String>, required: bool) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyFieldName);
        }
        if name.trim() == SKIP {
            return Err(ModelError::ReservedFieldName(name));
        }
        Ok(Self {
            name,
            required,
            key: None,
            label: None,
        })
    }

    /// Optional field with no key or label.
    pub fn optional(name: impl Into<String>) -> Result<Self> {
        Self::new(name, false)
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.key = if key.trim().is_empty() {
            None
        } else {
            Some(key)
        };
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.label = if label.trim().is_empty() {
            None
        } else {
            Some(label)
        };
        self
    }

    /// Label for display, falling back to the field name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
