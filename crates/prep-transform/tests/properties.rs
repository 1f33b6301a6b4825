//! Property-based tests for cleaning and scaling.

use std::collections::HashSet;

use polars::prelude::*;
use proptest::prelude::*;

use prep_common::row_values;
use prep_model::ZeroVariancePolicy;
use prep_transform::{SpellChecker, clean_data, transform_data};

fn frame(text: Vec<Option<String>>, numbers: Vec<Option<i64>>) -> DataFrame {
    DataFrame::new(vec![
        Series::new("text".into(), text).into(),
        Series::new("number".into(), numbers).into(),
    ])
    .unwrap()
}

fn rows() -> impl Strategy<Value = Vec<(Option<String>, Option<i64>)>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.9, "[a-zA-Z!,. ]{0,12}"),
            prop::option::weighted(0.9, 0i64..4),
        ),
        0..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cleaning_is_idempotent(rows in rows()) {
        let (text, numbers): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let df = frame(text, numbers);
        let checker = SpellChecker::english();

        let once = clean_data(&df, &checker).unwrap();
        let twice = clean_data(&once, &checker).unwrap();

        prop_assert!(once.equals(&twice));
    }

    #[test]
    fn cleaned_rows_are_complete_and_unique(rows in rows()) {
        let (text, numbers): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        let cleaned = clean_data(&frame(text, numbers), &SpellChecker::disabled()).unwrap();

        for column in cleaned.get_columns() {
            prop_assert_eq!(column.null_count(), 0);
        }
        let distinct: HashSet<Vec<Option<String>>> =
            (0..cleaned.height()).map(|idx| row_values(&cleaned, idx)).collect();
        prop_assert_eq!(distinct.len(), cleaned.height());
    }

    #[test]
    fn scaled_columns_have_zero_mean_unit_std(
        values in prop::collection::vec(-1000.0f64..1000.0, 2..30)
    ) {
        prop_assume!(values.iter().any(|v| *v != values[0]));
        let df = DataFrame::new(vec![Series::new("x".into(), values).into()]).unwrap();

        let out = transform_data(&df, ZeroVariancePolicy::Center).unwrap();
        let scaled: Vec<f64> = out.column("x").unwrap().f64().unwrap().into_no_null_iter().collect();

        let n = scaled.len() as f64;
        let mean = scaled.iter().sum::<f64>() / n;
        let std = (scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
        prop_assert!(mean.abs() < 1e-9, "mean = {}", mean);
        prop_assert!((std - 1.0).abs() < 1e-9, "std = {}", std);
    }
}
