//! CLI argument definitions for tabprep.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use prep_model::ZeroVariancePolicy;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Load, clean, validate and transform tabular data",
    long_about = "Load a dataset from a CSV file, a spreadsheet, a JSON API or a SQLite \
                  database, then clean it, check a domain constraint and write \
                  cleaned_data.csv and transformed_data.csv.\n\n\
                  Examples:\n  \
                  tabprep csv data.csv\n  \
                  tabprep excel book.xlsx --sort-column city\n  \
                  tabprep api https://example.com/rows\n  \
                  tabprep database sqlite:///app.db \"SELECT * FROM people\""
)]
pub struct Cli {
    /// Source kind: csv, excel, api or database.
    #[arg(value_name = "DATA_SOURCE")]
    pub data_source: String,

    /// File path, URL or connection string, depending on the source.
    #[arg(value_name = "SOURCE_PATH_OR_URL")]
    pub source: String,

    /// SQL query (database source only).
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// TOML file with pipeline options; flags override it.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for cleaned_data.csv and transformed_data.csv.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Column to sort the cleaned data by (default: name).
    #[arg(long = "sort-column", value_name = "COLUMN")]
    pub sort_column: Option<String>,

    /// Sort in descending order.
    #[arg(long = "descending")]
    pub descending: bool,

    /// Do not sort the cleaned data.
    #[arg(long = "no-sort", conflicts_with_all = ["sort_column", "descending"])]
    pub no_sort: bool,

    /// Column checked against the permitted values (default: some_column).
    #[arg(long = "constraint-column", value_name = "COLUMN")]
    pub constraint_column: Option<String>,

    /// Permitted value for the constraint column (repeatable).
    #[arg(long = "valid-value", value_name = "VALUE")]
    pub valid_values: Vec<String>,

    /// Skip the domain-constraint check.
    #[arg(long = "no-validate", conflicts_with_all = ["constraint_column", "valid_values"])]
    pub no_validate: bool,

    /// Word list for spelling correction, one `word [count]` per line.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,

    /// Disable spelling correction.
    #[arg(long = "no-spellcheck", conflicts_with = "dictionary")]
    pub no_spellcheck: bool,

    /// Largest edit distance accepted for a spelling correction.
    #[arg(long = "max-edit-distance", value_name = "N")]
    pub max_edit_distance: Option<usize>,

    /// Handling of numeric columns with zero variance.
    #[arg(long = "zero-variance", value_enum)]
    pub zero_variance: Option<ZeroVarianceArg>,

    /// API request timeout in seconds.
    #[arg(
        long = "api-timeout",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub api_timeout: Option<u64>,

    /// Also write the constraint report as JSON.
    #[arg(long = "report-json", value_name = "PATH")]
    pub report_json: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI zero-variance choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ZeroVarianceArg {
    /// Subtract the mean only; the column becomes zeros.
    Center,
    /// Leave the column unchanged.
    Skip,
}

impl From<ZeroVarianceArg> for ZeroVariancePolicy {
    fn from(arg: ZeroVarianceArg) -> Self {
        match arg {
            ZeroVarianceArg::Center => Self::Center,
            ZeroVarianceArg::Skip => Self::Skip,
        }
    }
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

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_database_invocation() {
        let cli = Cli::try_parse_from([
            "tabprep",
            "database",
            "sqlite:///app.db",
            "SELECT * FROM t",
            "--valid-value",
            "a",
            "--valid-value",
            "b",
        ])
        .unwrap();

        assert_eq!(cli.data_source, "database");
        assert_eq!(cli.query.as_deref(), Some("SELECT * FROM t"));
        assert_eq!(cli.valid_values, vec!["a", "b"]);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_no_sort_conflicts_with_sort_column() {
        let result = Cli::try_parse_from(["tabprep", "csv", "a.csv", "--no-sort", "--sort-column", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = Cli::try_parse_from(["tabprep", "api", "http://x", "--api-timeout", "0"]);
        assert!(result.is_err());
    }
}
