//! Expression AST nodes
//!
//! Rule predicates are built from these nodes at catalog construction
//! time. Derived-value nodes (`Magnitude`, `Ratio`, `AngleDiffDeg`)
//! cover the closed-form quantities the original checks compute inline.

use super::operator::Operator;
use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Literal value
    Literal(Value),

    /// Input field access by name
    Field(String),

    /// Binary operation
    Binary {
        left: Box<Expression>,
        op: Operator,
        right: Box<Expression>,
    },

    /// Unary operation
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// All sub-expressions must hold (AND over a list)
    All(Vec<Expression>),

    /// At least one sub-expression must hold (OR over a list)
    Any(Vec<Expression>),

    /// Euclidean magnitude of a 2-vector: sqrt(x² + y²).
    /// Used for range-from-origin and speed-from-velocity-components.
    Magnitude { x: Box<Expression>, y: Box<Expression> },

    /// Checked ratio of two counters. A zero denominator or a
    /// non-finite quotient is a division hazard, surfaced as an error
    /// rather than propagated as NaN/Infinity.
    Ratio {
        numerator: Box<Expression>,
        denominator: Box<Expression>,
    },

    /// Absolute difference in degrees between a reference angle and the
    /// direction of a 2-vector: |reference - atan2(y, x)·180/π|.
    /// The difference is deliberately not normalized into [0, 180];
    /// values near 360° wraparound are reported as-is, matching the
    /// original check.
    AngleDiffDeg {
        y: Box<Expression>,
        x: Box<Expression>,
        reference: Box<Expression>,
    },
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical NOT (!)
    Not,
    /// Arithmetic negation (-)
    Negate,
    /// Absolute value
    Abs,
}

impl Expression {
    /// Create a number literal
    pub fn num(value: f64) -> Self {
        Expression::Literal(Value::Number(value))
    }

    /// Create a choice literal
    pub fn choice(option: &str) -> Self {
        Expression::Literal(Value::Choice(option.to_string()))
    }

    /// Create a field access expression
    pub fn field(name: &str) -> Self {
        Expression::Field(name.to_string())
    }

    /// Create a binary expression
    pub fn binary(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Create a unary expression
    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// AND over a list of conditions
    pub fn all(conditions: Vec<Expression>) -> Self {
        Expression::All(conditions)
    }

    /// OR over a list of conditions
    pub fn any(conditions: Vec<Expression>) -> Self {
        Expression::Any(conditions)
    }

    /// sqrt(x² + y²)
    pub fn magnitude(x: Expression, y: Expression) -> Self {
        Expression::Magnitude {
            x: Box::new(x),
            y: Box::new(y),
        }
    }

    /// Checked counter ratio
    pub fn ratio(numerator: Expression, denominator: Expression) -> Self {
        Expression::Ratio {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
    }

    /// |reference - atan2(y, x) in degrees|
    pub fn angle_diff_deg(y: Expression, x: Expression, reference: Expression) -> Self {
        Expression::AngleDiffDeg {
            y: Box::new(y),
            x: Box::new(x),
            reference: Box::new(reference),
        }
    }

    // Fluent comparison/arithmetic helpers keep the catalog definitions
    // close to the shape of the original conditions.

    pub fn gt(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Gt, rhs)
    }

    pub fn ge(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Ge, rhs)
    }

    pub fn lt(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Lt, rhs)
    }

    pub fn le(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Le, rhs)
    }

    pub fn eq(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Eq, rhs)
    }

    pub fn ne(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Ne, rhs)
    }

    pub fn add(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Add, rhs)
    }

    pub fn sub(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Sub, rhs)
    }

    pub fn mul(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Mul, rhs)
    }

    pub fn div(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Div, rhs)
    }

    pub fn and(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::And, rhs)
    }

    pub fn or(self, rhs: Expression) -> Self {
        Expression::binary(self, Operator::Or, rhs)
    }

    pub fn not(self) -> Self {
        Expression::unary(UnaryOperator::Not, self)
    }

    pub fn abs(self) -> Self {
        Expression::unary(UnaryOperator::Abs, self)
    }

    /// Collect every field name this expression reads
    ///
    /// Used by the catalog self-consistency check: every referenced
    /// field must be declared in the owning rule's field specs.
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_fields(&mut names);
        names
    }

    fn collect_fields(&self, names: &mut BTreeSet<String>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Field(name) => {
                names.insert(name.clone());
            }
            Expression::Binary { left, right, .. } => {
                left.collect_fields(names);
                right.collect_fields(names);
            }
            Expression::Unary { operand, .. } => operand.collect_fields(names),
            Expression::All(conditions) | Expression::Any(conditions) => {
                for condition in conditions {
                    condition.collect_fields(names);
                }
            }
            Expression::Magnitude { x, y } => {
                x.collect_fields(names);
                y.collect_fields(names);
            }
            Expression::Ratio {
                numerator,
                denominator,
            } => {
                numerator.collect_fields(names);
                denominator.collect_fields(names);
            }
            Expression::AngleDiffDeg { y, x, reference } => {
                y.collect_fields(names);
                x.collect_fields(names);
                reference.collect_fields(names);
            }
        }
    }
}
