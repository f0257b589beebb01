use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use sixty_model::{AliasEntry, AliasTable, ColumnType, TargetField};

use crate::embedded;
use crate::error::StandardsError;
use crate::profile::{BuiltinProfile, DEFAULT_REQUIRED_FIELD, IntegrationProfile};

#[derive(Debug, Deserialize)]
struct FieldRow {
    name: String,
    key: Option<String>,
    label: Option<String>,
    #[serde(default)]
    required: bool,
}

#[derive(Debug, Deserialize)]
struct AliasRow {
    alias: String,
    target: String,
}

/// Load one of the embedded profiles.
pub fn load_builtin(profile: BuiltinProfile) -> Result<IntegrationProfile, StandardsError> {
    let (fields, aliases) = match profile {
        BuiltinProfile::HubSpot => (embedded::HUBSPOT_FIELDS, embedded::HUBSPOT_ALIASES),
        BuiltinProfile::Instantly => (embedded::INSTANTLY_FIELDS, embedded::INSTANTLY_ALIASES),
    };
    let targets = parse_fields_csv(&format!("{}/fields.csv", profile.id()), fields)?;
    let aliases = parse_aliases_csv(&format!("{}/aliases.csv", profile.id()), aliases)?;
    let loaded = IntegrationProfile {
        id: profile.id().to_string(),
        name: profile.name().to_string(),
        required_field: DEFAULT_REQUIRED_FIELD.to_string(),
        targets,
        aliases,
        excluded_types: None,
    };
    validate_profile(&loaded)?;
    debug!(
        profile = %profile,
        targets = loaded.targets.len(),
        aliases = loaded.aliases.len(),
        "loaded built-in profile"
    );
    Ok(loaded)
}

fn parse_fields_csv(name: &str, text: &str) -> Result<Vec<TargetField>, StandardsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut fields = Vec::new();
    for row in reader.deserialize::<FieldRow>() {
        let row = row.map_err(|e| StandardsError::csv(name, &e))?;
        let mut field = TargetField::new(row.name, row.required)?;
        if let Some(key) = row.key {
            field = field.with_key(key);
        }
        if let Some(label) = row.label {
            field = field.with_label(label);
        }
        fields.push(field);
    }
    Ok(fields)
}

fn parse_aliases_csv(name: &str, text: &str) -> Result<AliasTable, StandardsError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut pairs = Vec::new();
    for row in reader.deserialize::<AliasRow>() {
        let row = row.map_err(|e| StandardsError::csv(name, &e))?;
        pairs.push((row.alias, row.target));
    }
    Ok(AliasTable::from_pairs(pairs)?)
}

// =============================================================================
// Custom TOML profiles
// =============================================================================

#[derive(Debug, Deserialize)]
struct ProfileFile {
    profile: ProfileHeader,
    fields: Vec<TargetField>,
    #[serde(default)]
    aliases: Vec<AliasEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileHeader {
    id: String,
    name: Option<String>,
    required_field: Option<String>,
    excluded_types: Option<Vec<ColumnType>>,
}

/// Parse a custom profile from TOML text.
///
/// ```toml
/// [profile]
/// id = "salesforce"
/// required_field = "email"
///
/// [[fields]]
/// name = "email"
/// required = true
///
/// [[aliases]]
/// alias = "email_address"
/// target = "email"
/// ```
pub fn parse_profile_toml(
    text: &str,
    path: &Path,
) -> Result<IntegrationProfile, StandardsError> {
    let file: ProfileFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    let ProfileFile {
        profile,
        fields,
        aliases,
    } = file;
    let id = profile.id.trim().to_string();
    if id.is_empty() {
        return Err(StandardsError::invalid(
            &path.display().to_string(),
            "profile id must not be empty",
        ));
    }
    let aliases = AliasTable::from_pairs(aliases.into_iter().map(|e| (e.alias, e.target)))?;
    let loaded = IntegrationProfile {
        name: profile.name.unwrap_or_else(|| id.clone()),
        required_field: profile
            .required_field
            .unwrap_or_else(|| DEFAULT_REQUIRED_FIELD.to_string()),
        id,
        targets: fields,
        aliases,
        excluded_types: profile.excluded_types,
    };
    validate_profile(&loaded)?;
    Ok(loaded)
}

/// Load a custom profile from a TOML file.
pub fn load_profile_file(path: &Path) -> Result<IntegrationProfile, StandardsError> {
    let text = fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let profile = parse_profile_toml(&text, path)?;
    debug!(
        profile = %profile.id,
        path = %path.display(),
        targets = profile.targets.len(),
        "loaded custom profile"
    );
    Ok(profile)
}

/// Rejects profiles whose gate could never pass or whose aliases dangle.
fn validate_profile(profile: &IntegrationProfile) -> Result<(), StandardsError> {
    if profile.targets.is_empty() {
        return Err(StandardsError::invalid(&profile.id, "profile has no fields"));
    }
    if profile.required_field.trim().is_empty() {
        return Err(StandardsError::invalid(
            &profile.id,
            "required_field must not be empty",
        ));
    }
    let has_target = |name: &str| profile.targets.iter().any(|t| t.name == name);
    if !has_target(&profile.required_field) {
        return Err(StandardsError::invalid(
            &profile.id,
            format!(
                "required field '{}' is not one of the profile's fields",
                profile.required_field
            ),
        ));
    }
    if let Some(entry) = profile
        .aliases
        .entries()
        .iter()
        .find(|entry| !has_target(&entry.target))
    {
        return Err(StandardsError::invalid(
            &profile.id,
            format!(
                "alias '{}' points to unknown field '{}'",
                entry.alias, entry.target
            ),
        ));
    }
    Ok(())
}
