//! Domain constraints: the set of values a column is allowed to hold.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A column name plus its enumerable set of permitted values.
///
/// Membership is exact and case-sensitive. Constraints are only ever
/// reported on, never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConstraint {
    pub column: String,
    pub valid_values: BTreeSet<String>,
}

impl DomainConstraint {
    pub fn new<I, S>(column: impl Into<String>, valid_values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            valid_values: valid_values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permits(&self, value: &str) -> bool {
        self.valid_values.contains(value)
    }
}
