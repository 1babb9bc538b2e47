//! AST definitions for rule predicates
//!
//! Predicates are tagged-variant expression trees built once at catalog
//! construction. There is no scripting runtime and no closure capture;
//! everything a predicate can do is spelled out as a node here.

pub mod expression;
pub mod operator;
pub mod rule;

pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
pub use rule::{EvaluationResult, RuleDefinition, RuleInfo};
