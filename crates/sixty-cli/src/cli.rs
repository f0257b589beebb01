//! CLI argument definitions for the Sixty mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sixty-map",
    version,
    about = "Sixty schema auto-mapper - Match table columns onto integration fields",
    long_about = "Auto-map the columns of a CSV table onto a destination's field vocabulary.\n\n\
                  Ships HubSpot and Instantly profiles; extra TOML profiles load from\n\
                  --profile-file or the SIXTY_PROFILE_DIR directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in trace logs (source rows contain contact data).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Auto-map the columns of a CSV file onto a destination profile.
    Map(MapArgs),

    /// List available destination profiles.
    Profiles,
}

#[derive(Parser)]
pub struct MapArgs {
    /// CSV file whose header row names the source columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Destination profile id (see `profiles`).
    #[arg(long = "profile", default_value = "hubspot", conflicts_with_all = ["profile_file", "ops_table"])]
    pub profile: String,

    /// Load the destination profile from a TOML file.
    #[arg(long = "profile-file", value_name = "PATH")]
    pub profile_file: Option<PathBuf>,

    /// Import into another table: JSON array of the destination table's columns.
    #[arg(long = "ops-table", value_name = "PATH", conflicts_with = "profile_file")]
    pub ops_table: Option<PathBuf>,

    /// JSON array of source columns giving labels and types.
    ///
    /// Columns absent from the schema get their type inferred from values.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Require this field instead of the profile's required fields.
    #[arg(long = "required", value_name = "FIELD")]
    pub required: Option<String>,

    /// Bind a column to a field manually (repeatable).
    #[arg(long = "assign", value_name = "COLUMN=FIELD", value_parser = parse_assignment)]
    pub assign: Vec<(String, String)>,

    /// Leave a column unmapped (repeatable).
    #[arg(long = "skip", value_name = "COLUMN")]
    pub skip: Vec<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Number of rows to project through the mapping.
    #[arg(long = "preview", value_name = "N", default_value_t = 3)]
    pub preview: usize,

    /// Suggest up to N alternative fields for each skipped column.
    #[arg(long = "alternatives", value_name = "N", default_value_t = 0)]
    pub alternatives: usize,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_assignment(value: &str) -> Result<(String, String), String> {
    let (column, field) = value
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=FIELD, got '{value}'"))?;
    let (column, field) = (column.trim(), field.trim());
    if column.is_empty() || field.is_empty() {
        return Err(format!("expected COLUMN=FIELD, got '{value}'"));
    }
    Ok((column.to_string(), field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("Work Email = email").unwrap(),
            ("Work Email".to_string(), "email".to_string())
        );
        assert!(parse_assignment("email").is_err());
        assert!(parse_assignment("=email").is_err());
    }

    #[test]
    fn map_args_collect_repeated_overrides() {
        let cli = Cli::try_parse_from([
            "sixty-map",
            "map",
            "leads.csv",
            "--profile",
            "instantly",
            "--assign",
            "mail=email",
            "--assign",
            "org=company_name",
            "--skip",
            "notes",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Map(args) = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(args.profile, "instantly");
        assert_eq!(args.assign.len(), 2);
        assert_eq!(args.skip, vec!["notes".to_string()]);
        assert_eq!(args.preview, 3);
        assert!(matches!(args.format, OutputFormatArg::Json));
    }
}
