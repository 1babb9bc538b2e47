//! Runtime value types for Plausi rule inputs
//!
//! The `Value` enum represents all runtime values a rule predicate can
//! observe: booleans, finite floating-point numbers, and members of a
//! fixed enumeration (e.g. a filter type of "CA", "CV" or "LA").

use serde::{Deserialize, Serialize};

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Bool(bool),
    /// Number value (f64, always finite once validated)
    Number(f64),
    /// Member of a fixed enumeration option set
    Choice(String),
}

impl Value {
    /// Get the kind name as a string, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Choice(_) => "choice",
        }
    }

    /// Extract the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract the number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract the choice string, if this is one
    pub fn as_choice(&self) -> Option<&str> {
        match self {
            Value::Choice(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Choice(s.to_string())
    }
}
