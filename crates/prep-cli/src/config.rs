//! Run configuration: optional TOML file, then CLI flag overrides.
//!
//! ```toml
//! [analysis]
//! zero_variance = "skip"
//!
//! [analysis.sort]
//! column = "city"
//! order = "descending"
//!
//! [analysis.constraint]
//! column = "status"
//! valid_values = ["active", "inactive"]
//!
//! [analysis.spelling]
//! enabled = true
//! max_distance = 1
//!
//! [api]
//! timeout_secs = 5
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use prep_ingest::{ApiOptions, DEFAULT_API_TIMEOUT};
use prep_model::options::{DEFAULT_CONSTRAINT_COLUMN, DEFAULT_SORT_COLUMN, DEFAULT_VALID_VALUES};
use prep_model::{AnalysisOptions, DomainConstraint, SortOrder, SortSpec};

use crate::cli::Cli;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub analysis: AnalysisOptions,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_API_TIMEOUT.as_secs(),
        }
    }
}

/// Everything a run needs besides the source itself.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub analysis: AnalysisOptions,
    pub api: ApiOptions,
}

pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&text)
        .with_context(|| format!("parse config file {}", path.display()))?;
    // Same lower bound as --api-timeout.
    if config.api.timeout_secs == 0 {
        return Err(anyhow!(
            "invalid config file {}: [api] timeout_secs must be at least 1",
            path.display()
        ));
    }
    Ok(config)
}

/// Resolves settings: defaults, then the config file, then flags.
pub fn resolve_settings(cli: &Cli) -> Result<RunSettings> {
    let file = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };
    let mut analysis = file.analysis;
    apply_overrides(&mut analysis, cli);

    let timeout_secs = cli.api_timeout.unwrap_or(file.api.timeout_secs);
    Ok(RunSettings {
        analysis,
        api: ApiOptions {
            timeout: Duration::from_secs(timeout_secs),
        },
    })
}

fn apply_overrides(analysis: &mut AnalysisOptions, cli: &Cli) {
    if cli.no_sort {
        analysis.sort = None;
    } else if cli.sort_column.is_some() || cli.descending {
        let current = analysis.sort.take();
        let column = cli
            .sort_column
            .clone()
            .or_else(|| current.as_ref().map(|sort| sort.column.clone()))
            .unwrap_or_else(|| DEFAULT_SORT_COLUMN.to_string());
        let order = if cli.descending {
            SortOrder::Descending
        } else {
            current.map(|sort| sort.order).unwrap_or_default()
        };
        analysis.sort = Some(SortSpec::new(column, order));
    }

    if cli.no_validate {
        analysis.constraint = None;
    } else if cli.constraint_column.is_some() || !cli.valid_values.is_empty() {
        let current = analysis.constraint.take();
        let column = cli
            .constraint_column
            .clone()
            .or_else(|| current.as_ref().map(|c| c.column.clone()))
            .unwrap_or_else(|| DEFAULT_CONSTRAINT_COLUMN.to_string());
        let constraint = if !cli.valid_values.is_empty() {
            DomainConstraint::new(column, cli.valid_values.iter().cloned())
        } else if let Some(current) = current {
            DomainConstraint::new(column, current.valid_values)
        } else {
            DomainConstraint::new(column, DEFAULT_VALID_VALUES)
        };
        analysis.constraint = Some(constraint);
    }

    if cli.no_spellcheck {
        analysis.spelling.enabled = false;
    }
    if let Some(path) = &cli.dictionary {
        analysis.spelling.dictionary = Some(path.clone());
    }
    if let Some(distance) = cli.max_edit_distance {
        analysis.spelling.max_distance = distance;
    }
    if let Some(policy) = cli.zero_variance {
        analysis.zero_variance = policy.into();
    }
}
