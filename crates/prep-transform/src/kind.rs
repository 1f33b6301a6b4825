//! Numeric/categorical classification of columns.

use std::fmt;

use polars::prelude::{DataFrame, DataType};

use prep_common::is_numeric_dtype;

/// How the transformer treats a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Integer or floating dtype; standardized.
    Numeric,
    /// Every other dtype (text, boolean, temporal); one-hot encoded.
    Categorical,
}

impl ColumnKind {
    pub fn of(dtype: &DataType) -> Self {
        if is_numeric_dtype(dtype) {
            Self::Numeric
        } else {
            Self::Categorical
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Names of the columns of `kind`, in frame order.
pub fn columns_of_kind(df: &DataFrame, kind: ColumnKind) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| ColumnKind::of(column.dtype()) == kind)
        .map(|column| column.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use polars::prelude::{Column, NamedFrom, Series};

    use super::*;

    #[test]
    fn test_kind_from_dtype() {
        assert_eq!(ColumnKind::of(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::UInt8), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::String), ColumnKind::Categorical);
        assert_eq!(ColumnKind::of(&DataType::Boolean), ColumnKind::Categorical);
    }

    #[test]
    fn test_columns_of_kind_keeps_order() {
        let columns: Vec<Column> = vec![
            Series::new("b".into(), vec![1i64]).into(),
            Series::new("a".into(), vec!["x"]).into(),
            Series::new("c".into(), vec![0.5]).into(),
        ];
        let df = DataFrame::new(columns).unwrap();

        assert_eq!(columns_of_kind(&df, ColumnKind::Numeric), vec!["b", "c"]);
        assert_eq!(columns_of_kind(&df, ColumnKind::Categorical), vec!["a"]);
    }
}
