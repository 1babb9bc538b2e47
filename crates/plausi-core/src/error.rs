//! Error types for Plausi Core

use thiserror::Error;

/// Core error type
///
/// Covers everything that can go wrong while evaluating a predicate
/// against a typed input record. Input-shape problems (missing fields,
/// unparseable raw values) live in the engine crate; by the time a
/// record reaches evaluation only type and arithmetic errors remain.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A predicate referenced a field the record does not carry
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A value had the wrong kind for the operation applied to it
    #[error("Type mismatch in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    /// A ratio's denominator was zero, or the quotient was not finite
    #[error("Division hazard: {0}")]
    DivisionHazard(String),

    /// A derived quantity came out NaN or infinite
    #[error("Non-finite result in {0}")]
    NonFinite(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
