//! Required-field gate for submitting a mapping.
//!
//! Failing the gate is a UI condition (disabled submit, inline warning),
//! never an error.

use sixty_model::{FieldMapping, TargetField};

/// Returns true iff at least one mapping binds `required_field_name`.
pub fn can_submit(mappings: &[FieldMapping], required_field_name: &str) -> bool {
    mappings
        .iter()
        .any(|m| m.target() == Some(required_field_name))
}

/// Required targets not bound by any mapping, in vocabulary order.
pub fn missing_required(mappings: &[FieldMapping], targets: &[TargetField]) -> Vec<String> {
    targets
        .iter()
        .filter(|t| t.required && !can_submit(mappings, &t.name))
        .map(|t| t.name.clone())
        .collect()
}

/// Submit readiness of a mapping session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateStatus {
    /// At least one required field is unbound.
    Unsatisfied { missing: Vec<String> },
    /// Ready to submit.
    Satisfiable,
}

impl GateStatus {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, GateStatus::Satisfiable)
    }

    pub fn missing(&self) -> &[String] {
        match self {
            GateStatus::Unsatisfied { missing } => missing,
            GateStatus::Satisfiable => &[],
        }
    }
}

/// Combines the session's required field with every target flagged required.
pub fn gate_status(
    mappings: &[FieldMapping],
    required_field_name: &str,
    targets: &[TargetField],
) -> GateStatus {
    let mut missing = Vec::new();
    if !can_submit(mappings, required_field_name) {
        missing.push(required_field_name.to_string());
    }
    for name in missing_required(mappings, targets) {
        if !missing.contains(&name) {
            missing.push(name);
        }
    }
    if missing.is_empty() {
        GateStatus::Satisfiable
    } else {
        GateStatus::Unsatisfied { missing }
    }
}
