//! Source table loading: CSV header and rows, column types, schema files.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use serde_json::Value;
use tracing::{debug, trace, warn};

use sixty_map::SourceRow;
use sixty_model::{ColumnType, SourceColumn};

use crate::logging::redact_value;

/// Rows sampled per column when inferring its type.
pub const TYPE_SAMPLE_ROWS: usize = 50;

/// Columns and rows read from a CSV file.
#[derive(Debug, Clone, Default)]
pub struct SourceTable {
    pub columns: Vec<SourceColumn>,
    pub rows: Vec<SourceRow>,
}

/// Read a CSV file; the header row names the columns.
pub fn read_csv(path: &Path) -> Result<SourceTable> {
    let file = fs::File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_csv_from(file).with_context(|| format!("read {}", path.display()))
}

/// Read CSV data from any reader.
///
/// Blank headers become `column_<n>` (1-based). Empty cells become `null`.
/// Column keys are unique: a repeated header gets a `_2`, `_3`... suffix.
pub fn read_csv_from<R: Read>(reader: R) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("read header row")?
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header.to_string()
            }
        })
        .collect();
    let keys = unique_keys(headers);

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read row {}", idx + 1))?;
        let mut row = SourceRow::new();
        for (key, cell) in keys.iter().zip(record.iter()) {
            trace!(column = %key, value = redact_value(cell), "cell");
            let value = if cell.is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            row.insert(key.clone(), value);
        }
        rows.push(row);
    }

    let mut columns = Vec::with_capacity(keys.len());
    for key in &keys {
        let samples: Vec<&str> = rows
            .iter()
            .take(TYPE_SAMPLE_ROWS)
            .filter_map(|row| row.get(key).and_then(Value::as_str))
            .collect();
        let column_type = infer_column_type(&samples);
        debug!(column = %key, column_type = %column_type, "inferred column type");
        columns.push(SourceColumn::new(key.clone(), key.clone(), column_type)?);
    }
    Ok(SourceTable { columns, rows })
}

fn unique_keys(headers: Vec<String>) -> Vec<String> {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut keys = Vec::with_capacity(headers.len());
    for header in headers {
        let mut key = header.clone();
        let mut suffix = 2;
        while seen.contains(&key) {
            key = format!("{header}_{suffix}");
            suffix += 1;
        }
        if key != header {
            warn!(header = %header, column = %key, "repeated header renamed");
        }
        seen.insert(key.clone());
        keys.push(key);
    }
    keys
}

/// Guess a column's type from sampled non-empty values.
///
/// Every sample must agree; anything mixed or unsampled is text.
pub fn infer_column_type(samples: &[&str]) -> ColumnType {
    if samples.is_empty() {
        return ColumnType::Text;
    }
    if samples.iter().all(|v| looks_like_email(v)) {
        ColumnType::Email
    } else if samples.iter().all(|v| looks_like_url(v)) {
        ColumnType::Url
    } else if samples.iter().all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Number
    } else if samples.iter().all(|v| looks_like_boolean(v)) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn looks_like_url(value: &str) -> bool {
    let lower = value.to_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www."))
        && !value.contains(char::is_whitespace)
}

fn looks_like_boolean(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "true" | "false" | "yes" | "no"
    )
}

/// Load a JSON array of columns.
pub fn load_columns(path: &Path) -> Result<Vec<SourceColumn>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let columns: Vec<SourceColumn> =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let mut seen = BTreeSet::new();
    for column in &columns {
        if !seen.insert(column.key.as_str()) {
            bail!("{}: duplicate column key '{}'", path.display(), column.key);
        }
    }
    Ok(columns)
}

/// Replace inferred labels and types with those declared in a schema.
///
/// Schema entries are matched by key; blank labels keep the header text.
pub fn apply_schema(table: &mut SourceTable, schema: &[SourceColumn]) {
    let by_key: BTreeMap<&str, &SourceColumn> =
        schema.iter().map(|c| (c.key.as_str(), c)).collect();
    for column in &mut table.columns {
        let Some(declared) = by_key.get(column.key.as_str()) else {
            continue;
        };
        if !declared.label.trim().is_empty() {
            column.label = declared.label.clone();
        }
        column.column_type = declared.column_type.clone();
    }
    for declared in schema {
        if !table.columns.iter().any(|c| c.key == declared.key) {
            warn!(column = %declared.key, "schema column not present in CSV header");
        }
    }
}
