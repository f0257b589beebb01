//! Error types for mapping session edits.

use std::fmt;

/// Errors from editing or submitting a mapping session.
///
/// Auto-matching itself never fails; these only arise from caller edits
/// that name unknown columns or fields, or from submitting too early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Column key not present in the session.
    ColumnNotFound(String),
    /// Column holds computed values and cannot be mapped.
    ColumnExcluded(String),
    /// Field name not in the destination vocabulary.
    TargetNotFound(String),
    /// Submit attempted while required fields are unbound.
    RequiredFieldUnmapped(Vec<String>),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound(c) => write!(f, "Column not found: {c}"),
            Self::ColumnExcluded(c) => write!(f, "Column '{c}' holds computed values"),
            Self::TargetNotFound(t) => write!(f, "Target field not found: {t}"),
            Self::RequiredFieldUnmapped(fields) => {
                write!(f, "Required field not mapped: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for MappingError {}
