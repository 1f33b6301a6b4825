use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, info_span};

use prep_model::DataSource;
use prep_transform::SpellChecker;
use prep_validate::write_constraint_report_json;

use crate::cli::Cli;
use crate::config::resolve_settings;
use crate::pipeline::{load_source, perform_analysis, write_outputs};
use crate::types::{ArtifactSummary, CliError, RunResult};

/// Checks the positional arguments before any work is done.
pub fn parse_source(cli: &Cli) -> Result<DataSource, CliError> {
    let source = DataSource::parse(&cli.data_source)
        .ok_or_else(|| CliError::UnsupportedSource(cli.data_source.clone()))?;
    if source.requires_query() && cli.query.as_deref().is_none_or(|q| q.trim().is_empty()) {
        return Err(CliError::MissingQuery);
    }
    Ok(source)
}

/// Runs one load → analyze → write cycle.
pub fn run(cli: &Cli) -> Result<RunResult> {
    let start = Instant::now();
    let source = parse_source(cli)?;
    let run_span = info_span!("run", source = %source);
    let _run_guard = run_span.enter();

    let settings = resolve_settings(cli)?;
    let checker =
        SpellChecker::from_options(&settings.analysis.spelling).context("load spelling dictionary")?;

    let data = match load_source(source, &cli.source, cli.query.as_deref(), &settings.api) {
        Ok(data) => data,
        Err(err) => {
            error!(no_data = err.is_no_data(), error = %err, "failed to load data");
            return Err(CliError::LoadFailed(err).into());
        }
    };
    let (loaded_rows, loaded_columns) = data.shape();

    let mut output = perform_analysis(&data, &settings.analysis, &checker)?;
    let (cleaned_path, transformed_path) = write_outputs(&mut output, &cli.output_dir)?;

    let report_json = match (&cli.report_json, &output.constraint_report) {
        (Some(path), Some(report)) => {
            write_constraint_report_json(path, report)
                .with_context(|| format!("write constraint report {}", path.display()))?;
            Some(path.clone())
        }
        _ => None,
    };

    info!(
        rows = loaded_rows,
        cleaned_rows = output.cleaned.height(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunResult {
        source,
        location: cli.source.clone(),
        loaded_rows,
        loaded_columns,
        artifacts: vec![
            ArtifactSummary {
                label: "cleaned",
                rows: output.cleaned.height(),
                columns: output.cleaned.width(),
                path: cleaned_path,
            },
            ArtifactSummary {
                label: "transformed",
                rows: output.transformed.height(),
                columns: output.transformed.width(),
                path: transformed_path,
            },
        ],
        constraint_report: output.constraint_report,
        report_json,
    })
}
