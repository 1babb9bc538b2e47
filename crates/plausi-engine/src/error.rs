//! Engine error types

use plausi_core::CoreError;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Unknown rule id
    #[error("Rule not found: {0}")]
    NotFound(String),

    /// A required field was absent or empty in the raw input
    #[error("Missing field '{field}' for rule '{rule}'")]
    MissingField { rule: String, field: String },

    /// A raw value could not be coerced to the declared field kind
    #[error("Invalid value for field '{field}' of rule '{rule}': {reason}")]
    InvalidValue {
        rule: String,
        field: String,
        reason: String,
    },

    /// Catalog construction found a predicate reading an undeclared field
    #[error("Rule '{rule}' references undeclared field '{field}'")]
    UndeclaredField { rule: String, field: String },

    /// Evaluation error from the core layer (type mismatch, division
    /// hazard, non-finite result)
    #[error("Evaluation error: {0}")]
    Eval(#[from] CoreError),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
