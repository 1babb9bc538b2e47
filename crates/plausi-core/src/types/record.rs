//! Typed input records
//!
//! An `InputRecord` is the fully-validated, per-evaluation mapping from
//! field name to typed value. It is constructed by the validator, owned
//! by the caller, and never retained by the engine.

use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from field name to typed value
///
/// Backed by a `BTreeMap` so iteration order is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputRecord(BTreeMap<String, Value>);

impl InputRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert a value under a field name
    pub fn insert(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Look up a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Whether the record carries a field
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (name, value) pairs in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Get a boolean field, failing on absence or kind mismatch
    pub fn bool(&self, name: &str) -> Result<bool> {
        match self.get(name) {
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(CoreError::TypeMismatch {
                context: format!("field '{name}'"),
                expected: "boolean".to_string(),
                actual: other.kind_name().to_string(),
            }),
            None => Err(CoreError::UnknownField(name.to_string())),
        }
    }

    /// Get a number field, failing on absence or kind mismatch
    pub fn number(&self, name: &str) -> Result<f64> {
        match self.get(name) {
            Some(Value::Number(n)) => Ok(*n),
            Some(other) => Err(CoreError::TypeMismatch {
                context: format!("field '{name}'"),
                expected: "number".to_string(),
                actual: other.kind_name().to_string(),
            }),
            None => Err(CoreError::UnknownField(name.to_string())),
        }
    }

    /// Get a choice field, failing on absence or kind mismatch
    pub fn choice(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(Value::Choice(s)) => Ok(s),
            Some(other) => Err(CoreError::TypeMismatch {
                context: format!("field '{name}'"),
                expected: "choice".to_string(),
                actual: other.kind_name().to_string(),
            }),
            None => Err(CoreError::UnknownField(name.to_string())),
        }
    }
}

impl FromIterator<(String, Value)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_insert_and_get() {
        let record = InputRecord::new()
            .with("rcs", -12.0)
            .with("isObjectVru", true)
            .with("filterType", "CA");

        assert_eq!(record.len(), 3);
        assert_eq!(record.number("rcs").unwrap(), -12.0);
        assert!(record.bool("isObjectVru").unwrap());
        assert_eq!(record.choice("filterType").unwrap(), "CA");
    }

    #[test]
    fn test_record_unknown_field() {
        let record = InputRecord::new();
        let err = record.number("dyObj").unwrap_err();
        assert_eq!(err, CoreError::UnknownField("dyObj".to_string()));
    }

    #[test]
    fn test_record_kind_mismatch() {
        let record = InputRecord::new().with("rcs", true);
        let err = record.number("rcs").unwrap_err();
        assert!(matches!(err, CoreError::TypeMismatch { .. }));
    }

    #[test]
    fn test_record_deterministic_iteration() {
        let record = InputRecord::new()
            .with("zeta", 1.0)
            .with("alpha", 2.0)
            .with("mid", 3.0);

        let names: Vec<&String> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = InputRecord::new().with("dyObj", 3.0).with("vyObjRel", -1.0);
        let json = serde_json::to_string(&record).unwrap();
        let back: InputRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
