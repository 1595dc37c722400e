use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors raised when building a feature schema
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("feature schema has no columns")]
    Empty,

    #[error("duplicate feature column: {0}")]
    DuplicateColumn(String),
}

/// Ordered column names the model was trained on
///
/// Defines both the set and the order of model inputs. Fixed at startup and
/// shared read-only by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema, rejecting empty and duplicate column lists
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Sparse column -> value mapping produced by one-hot encoding a record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedRecord {
    values: HashMap<String, f64>,
}

impl EncodedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing any earlier value under the same name
    pub fn insert(&mut self, column: String, value: f64) {
        self.values.insert(column, value);
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Dense model input whose positions follow a [`FeatureSchema`] exactly
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeatureVector {
    values: Vec<f64>,
}

impl AlignedFeatureVector {
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pair each value with its column name
    pub fn named<'a>(
        &'a self,
        schema: &'a FeatureSchema,
    ) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_keeps_order() {
        let schema = FeatureSchema::new(cols(&["b", "a", "c"])).unwrap();
        assert_eq!(schema.columns(), &cols(&["b", "a", "c"])[..]);
        assert_eq!(schema.len(), 3);
        assert!(schema.contains("a"));
        assert!(!schema.contains("d"));
    }

    #[test]
    fn test_schema_rejects_empty() {
        assert_eq!(FeatureSchema::new(vec![]), Err(SchemaError::Empty));
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let err = FeatureSchema::new(cols(&["tenure", "Contract_One year", "tenure"])).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn("tenure".to_string()));
    }

    #[test]
    fn test_encoded_record_last_write_wins() {
        let mut record = EncodedRecord::new();
        record.insert("x".to_string(), 1.0);
        record.insert("x".to_string(), 2.0);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("x"), Some(2.0));
        assert_eq!(record.get("y"), None);
    }
}
