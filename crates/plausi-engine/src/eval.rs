//! Pure expression evaluation
//!
//! Evaluates a predicate expression tree against a validated input
//! record. Evaluation is side-effect free and deterministic: identical
//! expression and record always produce the identical result.

use plausi_core::error::{CoreError, Result};
use plausi_core::{Expression, InputRecord, Operator, UnaryOperator, Value};

/// Evaluate an expression to a value
pub fn eval(expr: &Expression, record: &InputRecord) -> Result<Value> {
    match expr {
        Expression::Literal(value) => Ok(value.clone()),

        Expression::Field(name) => record
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownField(name.clone())),

        Expression::Binary { left, op, right } => eval_binary(left, *op, right, record),

        Expression::Unary { op, operand } => {
            let value = eval(operand, record)?;
            match op {
                UnaryOperator::Not => Ok(Value::Bool(!expect_bool(&value, "logical not")?)),
                UnaryOperator::Negate => {
                    Ok(Value::Number(-expect_number(&value, "negation")?))
                }
                UnaryOperator::Abs => {
                    Ok(Value::Number(expect_number(&value, "abs")?.abs()))
                }
            }
        }

        Expression::All(conditions) => {
            for condition in conditions {
                if !eval_predicate(condition, record)? {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }

        Expression::Any(conditions) => {
            for condition in conditions {
                if eval_predicate(condition, record)? {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }

        Expression::Magnitude { x, y } => {
            let x = expect_number(&eval(x, record)?, "magnitude x component")?;
            let y = expect_number(&eval(y, record)?, "magnitude y component")?;
            Ok(Value::Number(x.hypot(y)))
        }

        Expression::Ratio {
            numerator,
            denominator,
        } => {
            let num = expect_number(&eval(numerator, record)?, "ratio numerator")?;
            let den = expect_number(&eval(denominator, record)?, "ratio denominator")?;
            if den == 0.0 {
                return Err(CoreError::DivisionHazard(
                    "ratio denominator is zero".to_string(),
                ));
            }
            let ratio = num / den;
            if !ratio.is_finite() {
                return Err(CoreError::DivisionHazard(format!(
                    "ratio {num}/{den} is not finite"
                )));
            }
            Ok(Value::Number(ratio))
        }

        Expression::AngleDiffDeg { y, x, reference } => {
            let y = expect_number(&eval(y, record)?, "angle-diff y component")?;
            let x = expect_number(&eval(x, record)?, "angle-diff x component")?;
            let reference = expect_number(&eval(reference, record)?, "angle-diff reference")?;
            let direction = y.atan2(x).to_degrees();
            // Not normalized into [0, 180]: wraparound near 360° stays.
            Ok(Value::Number((reference - direction).abs()))
        }
    }
}

/// Evaluate an expression expected to produce a boolean verdict
pub fn eval_predicate(expr: &Expression, record: &InputRecord) -> Result<bool> {
    let value = eval(expr, record)?;
    tracing::trace!(?expr, ?value, "predicate node evaluated");
    expect_bool(&value, "predicate")
}

fn eval_binary(
    left: &Expression,
    op: Operator,
    right: &Expression,
    record: &InputRecord,
) -> Result<Value> {
    // Logical operators short-circuit before the right side is touched
    if op.is_logical() {
        let lhs = expect_bool(&eval(left, record)?, op.symbol())?;
        return match op {
            Operator::And if !lhs => Ok(Value::Bool(false)),
            Operator::Or if lhs => Ok(Value::Bool(true)),
            _ => {
                let rhs = expect_bool(&eval(right, record)?, op.symbol())?;
                Ok(Value::Bool(rhs))
            }
        };
    }

    let lhs = eval(left, record)?;
    let rhs = eval(right, record)?;

    if op.is_comparison() {
        return compare(&lhs, op, &rhs).map(Value::Bool);
    }

    // Arithmetic
    let a = expect_number(&lhs, op.symbol())?;
    let b = expect_number(&rhs, op.symbol())?;
    let result = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
        _ => unreachable!("operator classes are exhaustive"),
    };
    if !result.is_finite() {
        return Err(CoreError::NonFinite(format!(
            "{a} {} {b}",
            op.symbol()
        )));
    }
    Ok(Value::Number(result))
}

fn compare(lhs: &Value, op: Operator, rhs: &Value) -> Result<bool> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(match op {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Gt => a > b,
            Operator::Ge => a >= b,
            Operator::Lt => a < b,
            Operator::Le => a <= b,
            _ => unreachable!("caller checked is_comparison"),
        }),
        (Value::Choice(a), Value::Choice(b)) => match op {
            Operator::Eq => Ok(a == b),
            Operator::Ne => Ok(a != b),
            _ => Err(CoreError::TypeMismatch {
                context: format!("choice comparison '{}'", op.symbol()),
                expected: "== or !=".to_string(),
                actual: op.symbol().to_string(),
            }),
        },
        (Value::Bool(a), Value::Bool(b)) => match op {
            Operator::Eq => Ok(a == b),
            Operator::Ne => Ok(a != b),
            _ => Err(CoreError::TypeMismatch {
                context: format!("boolean comparison '{}'", op.symbol()),
                expected: "== or !=".to_string(),
                actual: op.symbol().to_string(),
            }),
        },
        _ => Err(CoreError::TypeMismatch {
            context: format!("comparison '{}'", op.symbol()),
            expected: lhs.kind_name().to_string(),
            actual: rhs.kind_name().to_string(),
        }),
    }
}

fn expect_bool(value: &Value, context: &str) -> Result<bool> {
    value.as_bool().ok_or_else(|| CoreError::TypeMismatch {
        context: context.to_string(),
        expected: "boolean".to_string(),
        actual: value.kind_name().to_string(),
    })
}

fn expect_number(value: &Value, context: &str) -> Result<f64> {
    value.as_number().ok_or_else(|| CoreError::TypeMismatch {
        context: context.to_string(),
        expected: "number".to_string(),
        actual: value.kind_name().to_string(),
    })
}
