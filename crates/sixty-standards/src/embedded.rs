//! Embedded integration vocabularies.
//!
//! Field lists and alias tables are embedded at compile time using
//! `include_str!()`. Row order in each file is significant: matching is
//! first-match-wins in file order.

// =============================================================================
// HubSpot (CRM push)
// =============================================================================

/// HubSpot contact properties.
pub const HUBSPOT_FIELDS: &str = include_str!("../data/hubspot/fields.csv");

/// HubSpot alias table.
pub const HUBSPOT_ALIASES: &str = include_str!("../data/hubspot/aliases.csv");

// =============================================================================
// Instantly (campaign push)
// =============================================================================

/// Instantly lead variables.
pub const INSTANTLY_FIELDS: &str = include_str!("../data/instantly/fields.csv");

/// Instantly alias table.
pub const INSTANTLY_ALIASES: &str = include_str!("../data/instantly/aliases.csv");
