//! Rule definitions and evaluation results

use super::expression::Expression;
use crate::types::{FieldSpec, InputRecord};
use serde::{Deserialize, Serialize};

/// A single plausibility rule
///
/// Immutable after catalog construction; the catalog owns every
/// definition for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleDefinition {
    /// Unique, stable rule id (kebab-case)
    pub id: String,

    /// Display name (the original check function name)
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Ordered input field specifications
    pub fields: Vec<FieldSpec>,

    /// The predicate, as an expression tree
    pub predicate: Expression,

    /// Free-text effect description when the predicate holds.
    /// Opaque to the engine; carried through to results verbatim.
    pub action: String,
}

impl RuleDefinition {
    /// Create a new rule definition
    pub fn new(id: &str, name: &str, predicate: Expression) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            fields: Vec::new(),
            predicate,
            action: String::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the input fields
    pub fn with_fields(mut self, fields: Vec<FieldSpec>) -> Self {
        self.fields = fields;
        self
    }

    /// Set the action label
    pub fn with_action(mut self, action: &str) -> Self {
        self.action = action.to_string();
        self
    }

    /// Look up a field spec by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Serializable metadata view, without the predicate
    pub fn info(&self) -> RuleInfo {
        RuleInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            fields: self.fields.clone(),
            action: self.action.clone(),
        }
    }
}

/// Serializable rule metadata: everything a presentation layer needs to
/// render an input form. Predicates stay internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldSpec>,
    pub action: String,
}

/// Outcome of evaluating one rule against one input record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The rule that was evaluated
    pub rule_id: String,

    /// Whether the predicate held ("hit")
    pub outcome: bool,

    /// The rule's action label, meaningful when `outcome` is true
    pub action: String,

    /// The input record the verdict was computed from
    pub record: InputRecord,
}

impl EvaluationResult {
    /// Whether this result is a hit
    pub fn is_hit(&self) -> bool {
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldKind;

    #[test]
    fn test_rule_creation() {
        let rule = RuleDefinition::new(
            "suppressed-until-next-video-update",
            "applySuppressionUntilNextVideoUpdateCheck",
            Expression::field("isSuppressedUntilNextVideoUpdate"),
        )
        .with_description("Checks if object is suppressed until next video update")
        .with_fields(vec![FieldSpec::boolean(
            "isSuppressedUntilNextVideoUpdate",
            "Is Suppressed Until Next Video Update?",
        )])
        .with_action("Disqualifies for AEB");

        assert_eq!(rule.id, "suppressed-until-next-video-update");
        assert_eq!(rule.fields.len(), 1);
        assert_eq!(rule.action, "Disqualifies for AEB");
        assert!(rule.field("isSuppressedUntilNextVideoUpdate").is_some());
        assert!(rule.field("nope").is_none());
    }

    #[test]
    fn test_rule_info_excludes_predicate() {
        let rule = RuleDefinition::new("r", "R", Expression::field("flag"))
            .with_fields(vec![FieldSpec::boolean("flag", "Flag?")])
            .with_action("Does a thing");

        let info = rule.info();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"id\":\"r\""));
        assert!(!json.contains("predicate"));

        match &info.fields[0].kind {
            FieldKind::Boolean => {}
            other => panic!("Expected Boolean kind, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluation_result_is_hit() {
        let result = EvaluationResult {
            rule_id: "r".to_string(),
            outcome: true,
            action: "Disqualifies for AEB".to_string(),
            record: InputRecord::new(),
        };
        assert!(result.is_hit());
    }
}
