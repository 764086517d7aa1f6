//! Tabular in-memory dataset: named observation rows.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{RegressionError, Result};

/// One observation: a mapping from variable name to numeric value.
///
/// All rows in a dataset are expected to expose the same variable names
/// used by a configuration; the engine validates names against the first
/// row and reports [`RegressionError::MissingVariable`] when a configured
/// name is absent. Immutable once constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObservationRow {
    values: HashMap<String, f64>,
}

impl ObservationRow {
    /// Build a row from `(name, value)` pairs.
    pub fn new(values: impl IntoIterator<Item = (impl Into<String>, f64)>) -> Self {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a variable, failing with `MissingVariable` if absent.
    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| RegressionError::MissingVariable(name.to_string()))
    }

    /// Whether the row carries the named variable.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of variables on this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ObservationRow {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_present_and_missing() {
        let row = ObservationRow::new([("x", 1.5), ("y", 3.0)]);
        assert_eq!(row.get("x").unwrap(), 1.5);
        let err = row.get("z").unwrap_err();
        assert!(matches!(err, RegressionError::MissingVariable(name) if name == "z"));
    }

    #[test]
    fn test_contains_and_len() {
        let row = ObservationRow::new([("x", 2.0)]);
        assert!(row.contains("x"));
        assert!(!row.contains("y"));
        assert_eq!(row.len(), 1);
        assert!(!row.is_empty());
    }
}
