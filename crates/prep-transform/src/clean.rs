//! Dataset cleaning: duplicate rows, missing values and text normalization.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Instant;

use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, DataType, IntoSeries, NewChunkedArray,
    StringChunkedBuilder,
};
use regex::Regex;
use tracing::{debug, info};

use prep_common::{is_missing, row_values};

use crate::error::Result;
use crate::spelling::SpellChecker;

/// Anything other than ASCII letters, digits and whitespace.
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s]+").expect("Invalid character filter regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Removes rows that repeat an earlier row exactly. Survivors keep their order.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let keep: Vec<bool> = (0..df.height())
        .map(|idx| seen.insert(row_values(df, idx)))
        .collect();
    filter_rows(df, &keep, "dedupe")
}

/// Removes rows holding a null (or a NaN float) in any column.
pub fn drop_incomplete_rows(df: &DataFrame) -> Result<DataFrame> {
    let keep: Vec<bool> = (0..df.height())
        .map(|idx| {
            df.get_columns()
                .iter()
                .all(|column| !is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
        })
        .collect();
    filter_rows(df, &keep, "complete")
}

fn filter_rows(df: &DataFrame, keep: &[bool], name: &str) -> Result<DataFrame> {
    if keep.iter().all(|k| *k) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice(name.into(), keep);
    Ok(df.filter(&mask)?)
}

/// Normalizes one text cell: spelling per token, then the character filter,
/// then whitespace collapsing.
///
/// `cache` holds corrections already computed during this run.
pub fn normalize_text(
    value: &str,
    checker: &SpellChecker,
    cache: &mut HashMap<String, Option<String>>,
) -> String {
    let corrected: Vec<String> = value
        .split_whitespace()
        .map(|token| {
            let suggestion = cache
                .entry(token.to_string())
                .or_insert_with(|| checker.correction(token));
            suggestion.clone().unwrap_or_else(|| token.to_string())
        })
        .collect();
    let joined = corrected.join(" ");
    let filtered = DISALLOWED_CHARS.replace_all(&joined, "");
    WHITESPACE_RUN.replace_all(filtered.trim(), " ").into_owned()
}

fn normalize_text_columns(df: &mut DataFrame, checker: &SpellChecker) -> Result<usize> {
    let text_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().to_string())
        .collect();

    let mut cache: HashMap<String, Option<String>> = HashMap::new();
    let mut changed = 0usize;
    for name in &text_columns {
        let column = df.column(name)?;
        let values = column.str()?;
        let mut builder = StringChunkedBuilder::new(name.as_str().into(), values.len());
        for value in values {
            match value {
                Some(text) => {
                    let normalized = normalize_text(text, checker, &mut cache);
                    if normalized != text {
                        changed += 1;
                    }
                    builder.append_value(normalized);
                }
                None => builder.append_null(),
            }
        }
        df.with_column(builder.finish().into_series())?;
    }
    debug!(
        columns = text_columns.len(),
        changed_cells = changed,
        distinct_tokens = cache.len(),
        "normalized text columns"
    );
    Ok(changed)
}

/// Cleans a dataset.
///
/// 1. drops exact duplicate rows, first occurrence wins
/// 2. drops rows with a missing value
/// 3. spell-corrects and filters every text cell
/// 4. drops rows that became duplicates in step 3
///
/// Applying it twice gives the same result as applying it once.
pub fn clean_data(data: &DataFrame, checker: &SpellChecker) -> Result<DataFrame> {
    let start = Instant::now();
    let input_rows = data.height();

    let deduped = drop_duplicate_rows(data)?;
    let duplicates = input_rows - deduped.height();
    let mut complete = drop_incomplete_rows(&deduped)?;
    let incomplete = deduped.height() - complete.height();
    let changed_cells = normalize_text_columns(&mut complete, checker)?;
    let cleaned = drop_duplicate_rows(&complete)?;

    info!(
        input_rows,
        output_rows = cleaned.height(),
        duplicates,
        incomplete,
        changed_cells,
        collapsed = complete.height() - cleaned.height(),
        duration_ms = start.elapsed().as_millis(),
        "cleaned dataset"
    );
    Ok(cleaned)
}
