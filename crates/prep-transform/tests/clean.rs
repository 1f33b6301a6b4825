//! Tests for the cleaner.

use std::io::Cursor;

use polars::prelude::*;
use prep_transform::{SpellChecker, clean_data};

fn strings(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_duplicate_rows_keep_first_occurrence() {
    let df = DataFrame::new(vec![
        Series::new("id".into(), vec!["A", "B", "A"]).into(),
        Series::new("n".into(), vec![1i64, 2, 1]).into(),
    ])
    .unwrap();

    let cleaned = clean_data(&df, &SpellChecker::disabled()).unwrap();

    assert_eq!(strings(&cleaned, "id"), vec!["A", "B"]);
}

#[test]
fn test_rows_with_missing_values_are_dropped() {
    let df = DataFrame::new(vec![
        Series::new("name".into(), vec![Some("ann"), None, Some("cy")]).into(),
        Series::new("score".into(), vec![Some(1.0), Some(2.0), Some(f64::NAN)]).into(),
    ])
    .unwrap();

    let cleaned = clean_data(&df, &SpellChecker::disabled()).unwrap();

    assert_eq!(cleaned.height(), 1);
    for column in cleaned.get_columns() {
        assert_eq!(column.null_count(), 0);
    }
}

#[test]
fn test_text_is_corrected_and_filtered() {
    let checker = SpellChecker::from_reader(Cursor::new("street 10\nlondon 10\n")).unwrap();
    let df = DataFrame::new(vec![
        Series::new("address".into(), vec!["12 Stret,  Londn!", "n/a"]).into(),
    ])
    .unwrap();

    let cleaned = clean_data(&df, &checker).unwrap();

    assert_eq!(strings(&cleaned, "address"), vec!["12 Street London", "na"]);
}

#[test]
fn test_rows_equal_after_normalization_collapse() {
    let df = DataFrame::new(vec![
        Series::new("city".into(), vec!["Oslo!", "Oslo", "Bergen"]).into(),
    ])
    .unwrap();

    let cleaned = clean_data(&df, &SpellChecker::disabled()).unwrap();

    assert_eq!(strings(&cleaned, "city"), vec!["Oslo", "Bergen"]);
}

#[test]
fn test_empty_frame_is_cleaned() {
    let df = DataFrame::new(vec![
        Series::new("a".into(), Vec::<String>::new()).into(),
    ])
    .unwrap();

    let cleaned = clean_data(&df, &SpellChecker::english()).unwrap();

    assert_eq!(cleaned.shape(), (0, 1));
}
