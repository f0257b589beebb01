//! Schema auto-mapping.
//!
//! Matches a source table's columns onto a destination's known field set:
//! normalize the column name, look it up in the integration's alias table,
//! and fall back to substring containment against the target vocabulary.
//! Every eligible column yields exactly one [`FieldMapping`], bound or
//! skipped. The [`gate`] module decides whether a mapping may be submitted.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod gate;
pub mod patterns;
pub mod preview;
pub mod score;
pub mod state;
pub mod utils;

pub use engine::{ExclusionRule, MappingEngine, MappingResult, MatchSummary, build_mappings};
pub use error::MappingError;
pub use gate::{GateStatus, can_submit, gate_status, missing_required};
pub use patterns::{match_exact, match_fuzzy};
pub use preview::{PREVIEW_ROW_LIMIT, PreviewRow, SourceRow, preview};
pub use score::{RankedTarget, ScoringEngine};
pub use state::{MappingSession, SessionSummary};
pub use utils::normalize;

pub use sixty_model::{
    AliasTable, ColumnType, FieldMapping, MappingTarget, MatchOrigin, SourceColumn, TargetField,
};
