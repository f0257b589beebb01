//! Data model for Sixty schema auto-mapping.
//!
//! Source columns come from the host table's schema, target fields from the
//! destination integration's fixed vocabulary. A [`FieldMapping`] binds one
//! source column to at most one target field.

pub mod alias;
pub mod column;
pub mod error;
pub mod mapping;
pub mod target;

pub use alias::{AliasEntry, AliasTable};
pub use column::{ColumnType, SourceColumn};
pub use error::{ModelError, Result};
pub use mapping::{FieldMapping, MappingTarget, MatchOrigin};
pub use target::TargetField;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mapping_serializes_for_push_payload() {
        let mapping = FieldMapping::bound("email_address", "email", MatchOrigin::Alias);
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        assert_eq!(
            json,
            r#"{"sourceColumnKey":"email_address","targetFieldName":"email","origin":"alias"}"#
        );
    }

    #[test]
    fn unbound_mapping_serializes_as_skip() {
        let mapping = FieldMapping::unbound("notes");
        let json = serde_json::to_string(&mapping).expect("serialize mapping");
        assert!(json.contains(r#""targetFieldName":"skip""#));
        let round: FieldMapping = serde_json::from_str(&json).expect("deserialize mapping");
        assert_eq!(round.target_field_name, MappingTarget::Skip);
    }
}
