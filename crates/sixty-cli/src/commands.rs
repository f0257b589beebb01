use anyhow::{Context, Result, bail};
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span, warn};

use sixty_cli::report::MapReport;
use sixty_cli::source::{apply_schema, load_columns, read_csv};
use sixty_standards::profile::DEFAULT_REQUIRED_FIELD;
use sixty_standards::{IntegrationProfile, ProfileRegistry, load_profile_file};

use crate::cli::MapArgs;
use crate::summary::apply_table_style;

pub fn run_profiles() -> Result<()> {
    let registry = ProfileRegistry::from_env().context("load profiles")?;
    let mut table = Table::new();
    table.set_header(vec!["Profile", "Name", "Required", "Fields", "Aliases"]);
    apply_table_style(&mut table);
    for profile in registry.iter() {
        table.add_row(vec![
            Cell::new(&profile.id),
            Cell::new(&profile.name),
            Cell::new(&profile.required_field),
            Cell::new(profile.targets.len()).set_alignment(CellAlignment::Right),
            Cell::new(profile.aliases.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_map(args: &MapArgs) -> Result<MapReport> {
    let mut table = read_csv(&args.csv)?;
    if let Some(path) = &args.schema {
        let schema = load_columns(path).context("load source schema")?;
        apply_schema(&mut table, &schema);
    }

    let mut profile = resolve_profile(args)?;
    if let Some(required) = &args.required {
        profile = profile
            .with_required_field(required)
            .context("override required field")?;
    }

    let span = info_span!("map", profile = %profile.id);
    let _guard = span.enter();
    info!(
        columns = table.columns.len(),
        rows = table.rows.len(),
        "loaded source table"
    );

    let mut session = profile.session(table.columns);
    for (column, field) in &args.assign {
        session
            .assign(column, field)
            .with_context(|| format!("assign {column}={field}"))?;
    }
    for column in &args.skip {
        session
            .skip(column)
            .with_context(|| format!("skip {column}"))?;
    }

    let report = MapReport::from_session(
        &profile.id,
        &session,
        &table.rows,
        args.preview,
        args.alternatives,
    );
    if !report.ready() {
        warn!(missing = ?report.missing_required, "required fields not mapped");
    }
    Ok(report)
}

fn resolve_profile(args: &MapArgs) -> Result<IntegrationProfile> {
    if let Some(path) = &args.profile_file {
        return load_profile_file(path).context("load profile file");
    }
    if let Some(path) = &args.ops_table {
        let columns = load_columns(path).context("load destination table")?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "table".to_string());
        let required = args.required.as_deref().unwrap_or(DEFAULT_REQUIRED_FIELD);
        return IntegrationProfile::ops_table(&name, &columns, required)
            .context("build destination table profile");
    }
    let registry = ProfileRegistry::from_env().context("load profiles")?;
    match registry.get(&args.profile) {
        Some(profile) => Ok(profile.clone()),
        None => bail!(
            "unknown profile '{}' (available: {})",
            args.profile,
            registry.ids().join(", ")
        ),
    }
}
