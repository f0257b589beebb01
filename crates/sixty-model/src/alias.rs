//! Per-integration alias tables.
//!
//! An alias table maps known source-column name variants to canonical target
//! field names. Each integration surface owns its own table; there is no
//! shared global table. Entries keep insertion order, and lookups take the
//! first entry whose alias matches.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Source column name variant, compared after normalization.
    pub alias: String,
    /// Canonical target field name.
    pub target: String,
}

/// Ordered, immutable alias dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// An empty table (cross-table import has no aliases).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(alias, target)` pairs, preserving their order.
    pub fn from_pairs<I, A, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, T)>,
        A: Into<String>,
        T: Into<String>,
    {
        let mut entries = Vec::new();
        for (alias, target) in pairs {
            let alias = alias.into();
            let target = target.into();
            if target.trim().is_empty() {
                return Err(ModelError::EmptyFieldName);
            }
            if alias.trim().is_empty() {
                return Err(ModelError::EmptyAlias { target });
            }
            entries.push(AliasEntry { alias, target });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
