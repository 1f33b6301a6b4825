use prep_model::{
    AnalysisOptions, CellValue, DataSource, DomainConstraint, SortOrder, ZeroVariancePolicy,
};

#[test]
fn default_options_match_placeholder_business_rules() {
    let options = AnalysisOptions::default();

    let sort = options.sort.expect("default sort");
    assert_eq!(sort.column, "name");
    assert_eq!(sort.order, SortOrder::Ascending);

    let constraint = options.constraint.expect("default constraint");
    assert_eq!(constraint.column, "some_column");
    assert!(constraint.permits("Value1"));
    assert!(constraint.permits("Value3"));
    assert!(!constraint.permits("value1"));

    assert!(options.spelling.enabled);
    assert_eq!(options.spelling.max_distance, 2);
    assert_eq!(options.zero_variance, ZeroVariancePolicy::Center);
}

#[test]
fn options_deserialize_with_partial_fields() {
    let json = r#"{
        "sort": {"column": "city", "order": "descending"},
        "zero_variance": "skip"
    }"#;
    let options: AnalysisOptions = serde_json::from_str(json).expect("parse options");

    let sort = options.sort.expect("sort");
    assert_eq!(sort.column, "city");
    assert!(!sort.order.is_ascending());
    assert_eq!(options.zero_variance, ZeroVariancePolicy::Skip);
    // Unspecified sections keep their defaults.
    assert_eq!(
        options.constraint.map(|c| c.column),
        Some("some_column".to_string())
    );
}

#[test]
fn data_source_parse_is_case_insensitive() {
    assert_eq!(DataSource::parse("CSV"), Some(DataSource::Csv));
    assert_eq!(DataSource::parse(" excel "), Some(DataSource::Excel));
    assert_eq!(DataSource::parse("api"), Some(DataSource::Api));
    assert_eq!(DataSource::parse("database"), Some(DataSource::Database));
    assert_eq!(DataSource::parse("parquet"), None);
    assert!(DataSource::Database.requires_query());
    assert!(!DataSource::Csv.requires_query());
    assert_eq!(DataSource::Api.to_string(), "api");
}

#[test]
fn cell_value_text_treats_empty_as_missing() {
    assert!(CellValue::text("").is_missing());
    assert_eq!(CellValue::text("a"), CellValue::Text("a".to_string()));
    assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
    assert_eq!(CellValue::Text("3".into()).as_f64(), None);
    assert_eq!(CellValue::Missing.to_text(), None);
}

#[test]
fn constraint_deduplicates_values() {
    let constraint = DomainConstraint::new("status", ["open", "closed", "open"]);
    assert_eq!(constraint.valid_values.len(), 2);
}
