//! Plausi Core - Core types for the Plausi plausibility-rule engine
//!
//! This crate provides the fundamental types used across the Plausi workspace:
//! - Value types for runtime data
//! - Field specifications for rule inputs
//! - Expression AST for rule predicates
//! - Error types

pub mod ast;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::{EvaluationResult, Expression, Operator, RuleDefinition, RuleInfo, UnaryOperator};
pub use error::CoreError;
pub use types::{FieldKind, FieldSpec, InputRecord, Value};
