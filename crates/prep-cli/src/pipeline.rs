//! Pipeline stages: load, analyze, write.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info, info_span};

use prep_ingest::{ApiOptions, IngestError, load_api_with_options, load_csv, load_database, load_excel};
use prep_model::{AnalysisOptions, DataSource};
use prep_transform::{SpellChecker, clean_data, sort_by, transform_data};
use prep_validate::{ConstraintReport, check_domain_constraints};

pub const CLEANED_FILE_NAME: &str = "cleaned_data.csv";
pub const TRANSFORMED_FILE_NAME: &str = "transformed_data.csv";

/// Result of [`perform_analysis`].
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub cleaned: DataFrame,
    pub transformed: DataFrame,
    /// Present when the constraint column exists in the cleaned data.
    pub constraint_report: Option<ConstraintReport>,
}

/// Loads a dataset from `source`.
///
/// `query` is only used by the database source and must be present for it.
pub fn load_source(
    source: DataSource,
    location: &str,
    query: Option<&str>,
    api: &ApiOptions,
) -> std::result::Result<DataFrame, IngestError> {
    let _guard = info_span!("load", source = %source).entered();
    match source {
        DataSource::Csv => load_csv(Path::new(location)),
        DataSource::Excel => load_excel(Path::new(location)),
        DataSource::Api => load_api_with_options(location, api),
        DataSource::Database => load_database(location, query.unwrap_or_default()),
    }
}

/// Cleans, optionally sorts and validates, then transforms `data`.
///
/// Sorting and validation only run when their column exists in the cleaned
/// data. The constraint report never changes the outputs.
pub fn perform_analysis(
    data: &DataFrame,
    options: &AnalysisOptions,
    checker: &SpellChecker,
) -> Result<AnalysisOutput> {
    let mut cleaned = {
        let _guard = info_span!("clean").entered();
        clean_data(data, checker).context("clean data")?
    };

    if let Some(sort) = &options.sort {
        let _guard = info_span!("sort", column = %sort.column).entered();
        if cleaned.column(&sort.column).is_ok() {
            cleaned = sort_by(&cleaned, sort).context("sort data")?;
            info!(order = %sort.order, "sorted cleaned data");
        } else {
            debug!("sort column absent; keeping row order");
        }
    }

    let constraint_report = match &options.constraint {
        Some(constraint) if cleaned.column(&constraint.column).is_ok() => {
            let _guard = info_span!("validate", column = %constraint.column).entered();
            Some(check_domain_constraints(&cleaned, constraint).context("check constraints")?)
        }
        Some(constraint) => {
            debug!(column = %constraint.column, "constraint column absent; skipping check");
            None
        }
        None => None,
    };

    let transformed = {
        let _guard = info_span!("transform").entered();
        transform_data(&cleaned, options.zero_variance).context("transform data")?
    };

    Ok(AnalysisOutput {
        cleaned,
        transformed,
        constraint_report,
    })
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Writes both artifacts into `output_dir`, replacing existing files.
///
/// Each file is written under a temporary name and renamed once both are
/// complete, so a failed run leaves no partial artifacts behind. The two
/// renames are not one atomic step: if the second fails, both artifacts are
/// removed rather than leaving this run's cleaned file next to an older
/// transformed file.
pub fn write_outputs(output: &mut AnalysisOutput, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let _guard = info_span!("write", dir = %output_dir.display()).entered();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;

    let cleaned_path = output_dir.join(CLEANED_FILE_NAME);
    let transformed_path = output_dir.join(TRANSFORMED_FILE_NAME);
    let cleaned_tmp = output_dir.join(format!(".{CLEANED_FILE_NAME}.tmp"));
    let transformed_tmp = output_dir.join(format!(".{TRANSFORMED_FILE_NAME}.tmp"));

    let written = write_csv(&mut output.cleaned, &cleaned_tmp)
        .and_then(|()| write_csv(&mut output.transformed, &transformed_tmp));
    if let Err(error) = written {
        let _ = fs::remove_file(&cleaned_tmp);
        let _ = fs::remove_file(&transformed_tmp);
        return Err(error);
    }
    if let Err(error) = fs::rename(&cleaned_tmp, &cleaned_path) {
        let _ = fs::remove_file(&cleaned_tmp);
        let _ = fs::remove_file(&transformed_tmp);
        return Err(error).with_context(|| format!("move {} into place", cleaned_path.display()));
    }
    if let Err(error) = fs::rename(&transformed_tmp, &transformed_path) {
        let _ = fs::remove_file(&transformed_tmp);
        let _ = fs::remove_file(&cleaned_path);
        let _ = fs::remove_file(&transformed_path);
        return Err(error)
            .with_context(|| format!("move {} into place", transformed_path.display()));
    }

    info!(
        cleaned = %cleaned_path.display(),
        transformed = %transformed_path.display(),
        "wrote outputs"
    );
    Ok((cleaned_path, transformed_path))
}
