//! Raw input validation
//!
//! Turns a raw, loosely-typed string map (as read from a form) into a
//! fully-typed `InputRecord` against a rule's declared field specs.
//! Validation is all-or-nothing: a partial record never reaches a
//! predicate.

use crate::error::{EngineError, Result};
use plausi_core::{FieldKind, InputRecord, RuleDefinition, Value};
use std::collections::HashMap;

/// Validate a raw string map against a rule's field specs
///
/// Fields carrying a default are filled from it when absent or empty;
/// every other field must be present with a non-empty value.
pub fn validate(rule: &RuleDefinition, raw: &HashMap<String, String>) -> Result<InputRecord> {
    let mut record = InputRecord::new();

    for spec in &rule.fields {
        let raw_value = raw.get(&spec.name).map(String::as_str).unwrap_or("");

        if raw_value.trim().is_empty() {
            match spec.default {
                Some(default) => {
                    record.insert(&spec.name, Value::Number(default));
                    continue;
                }
                None => {
                    return Err(EngineError::MissingField {
                        rule: rule.id.clone(),
                        field: spec.name.clone(),
                    });
                }
            }
        }

        let value = coerce(rule, &spec.name, &spec.kind, raw_value.trim())?;
        record.insert(&spec.name, value);
    }

    Ok(record)
}

/// Verify an already-typed record against a rule's field specs
///
/// Checks presence and kind for every declared field, filling defaulted
/// fields that are absent. Idempotent: verifying a record this function
/// has accepted returns it unchanged.
pub fn verify_record(rule: &RuleDefinition, record: &InputRecord) -> Result<InputRecord> {
    let mut verified = record.clone();

    for spec in &rule.fields {
        match record.get(&spec.name) {
            None => match spec.default {
                Some(default) => verified.insert(&spec.name, Value::Number(default)),
                None => {
                    return Err(EngineError::MissingField {
                        rule: rule.id.clone(),
                        field: spec.name.clone(),
                    });
                }
            },
            Some(value) => check_kind(rule, &spec.name, &spec.kind, value)?,
        }
    }

    Ok(verified)
}

fn coerce(rule: &RuleDefinition, field: &str, kind: &FieldKind, raw: &str) -> Result<Value> {
    match kind {
        FieldKind::Boolean => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            other => Err(EngineError::InvalidValue {
                rule: rule.id.clone(),
                field: field.to_string(),
                reason: format!("expected 'true' or 'false', got '{other}'"),
            }),
        },

        FieldKind::Number => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Value::Number(n)),
            Ok(n) => Err(EngineError::InvalidValue {
                rule: rule.id.clone(),
                field: field.to_string(),
                reason: format!("number is not finite: {n}"),
            }),
            Err(_) => Err(EngineError::InvalidValue {
                rule: rule.id.clone(),
                field: field.to_string(),
                reason: format!("not a number: '{raw}'"),
            }),
        },

        FieldKind::Choice { options } => {
            if options.iter().any(|o| o == raw) {
                Ok(Value::Choice(raw.to_string()))
            } else {
                Err(EngineError::InvalidValue {
                    rule: rule.id.clone(),
                    field: field.to_string(),
                    reason: format!("'{raw}' is not one of {options:?}"),
                })
            }
        }
    }
}

fn check_kind(rule: &RuleDefinition, field: &str, kind: &FieldKind, value: &Value) -> Result<()> {
    let ok = match (kind, value) {
        (FieldKind::Boolean, Value::Bool(_)) => true,
        (FieldKind::Number, Value::Number(n)) => n.is_finite(),
        (FieldKind::Choice { options }, Value::Choice(s)) => options.iter().any(|o| o == s),
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(EngineError::InvalidValue {
            rule: rule.id.clone(),
            field: field.to_string(),
            reason: format!(
                "expected {}, got {} value",
                kind.kind_name(),
                value.kind_name()
            ),
        })
    }
}
