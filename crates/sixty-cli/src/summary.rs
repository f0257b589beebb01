use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::Value;

use sixty_cli::report::MapReport;
use sixty_model::{FieldMapping, MatchOrigin};

pub fn print_report(report: &MapReport) {
    println!("Profile: {}", report.profile);
    println!("Required field: {}", report.required_field);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Origin"),
    ]);
    apply_mapping_table_style(&mut table);
    for mapping in &report.mappings {
        table.add_row(vec![
            Cell::new(&mapping.source_column_key),
            field_cell(mapping, &report.required_field),
            origin_cell(mapping.origin),
        ]);
    }
    for column in &report.excluded_columns {
        table.add_row(vec![
            dim_cell(column),
            dim_cell("-"),
            dim_cell("excluded"),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "Matched {} of {} columns ({} manual, {} skipped, {} excluded)",
        summary.matched, summary.eligible, summary.manual, summary.skipped, summary.excluded
    );
    for (target, columns) in &report.duplicate_targets {
        println!(
            "warning: '{target}' is mapped from several columns: {}",
            columns.join(", ")
        );
    }
    for (column, options) in &report.alternatives {
        let names: Vec<String> = options
            .iter()
            .map(|o| format!("{} ({:.2})", o.name, o.score))
            .collect();
        println!("Suggestions for '{column}': {}", names.join(", "));
    }

    print_preview(report);

    if report.ready() {
        println!("Ready to submit.");
    } else {
        println!(
            "Not ready: map a column to {}.",
            report.missing_required.join(", ")
        );
    }
}

fn print_preview(report: &MapReport) {
    let Some(first) = report.preview.first() else {
        return;
    };
    let fields: Vec<&String> = first.keys().collect();
    if fields.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(fields.iter().map(|f| header_cell(f)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in &report.preview {
        table.add_row(
            fields
                .iter()
                .map(|field| value_cell(row.get(field.as_str())))
                .collect::<Vec<_>>(),
        );
    }
    println!("Preview ({} rows):", report.preview.len());
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_mapping_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Center);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn field_cell(mapping: &FieldMapping, required_field: &str) -> Cell {
    match mapping.target() {
        Some(name) if name == required_field => Cell::new(name)
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(name) => Cell::new(name),
        None => dim_cell("skip"),
    }
}

fn origin_cell(origin: MatchOrigin) -> Cell {
    match origin {
        MatchOrigin::Alias => Cell::new(origin).fg(Color::Blue),
        MatchOrigin::Fuzzy => Cell::new(origin).fg(Color::Yellow),
        MatchOrigin::Manual => Cell::new(origin).fg(Color::Magenta),
        MatchOrigin::Unmatched => dim_cell(origin),
    }
}

fn value_cell(value: Option<&Value>) -> Cell {
    match value {
        None | Some(Value::Null) => dim_cell("-"),
        Some(Value::String(text)) => Cell::new(text),
        Some(other) => Cell::new(other),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
