//! Engine facade
//!
//! Owns the catalog and exposes the whole surface a caller needs:
//! listing rules, validating raw input, evaluating records, and
//! running the full catalog against a batch of raw inputs.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::eval::eval_predicate;
use crate::report::{BatchEntry, Summary};
use crate::validator::{validate, verify_record};
use plausi_core::{EvaluationResult, InputRecord, RuleDefinition, RuleInfo};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Rule evaluation engine over the standard catalog
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
}

impl Engine {
    /// Build an engine over the standard catalog
    pub fn new() -> Result<Self> {
        let catalog = Catalog::standard()?;
        debug!(rules = catalog.len(), "engine initialized");
        Ok(Self { catalog })
    }

    /// Build an engine over an explicit catalog
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// The underlying rule definitions, in catalog order
    pub fn rules(&self) -> &[RuleDefinition] {
        self.catalog.all()
    }

    /// Serializable metadata for every rule, in catalog order
    pub fn list_rules(&self) -> Vec<RuleInfo> {
        self.catalog.all().iter().map(|r| r.info()).collect()
    }

    /// Validate raw string input against a rule's field specs
    ///
    /// Produces a typed record with defaulted thresholds filled in.
    pub fn validate(&self, rule_id: &str, raw: &HashMap<String, String>) -> Result<InputRecord> {
        let rule = self.catalog.get(rule_id)?;
        validate(rule, raw)
    }

    /// Evaluate a rule against an already-typed record
    ///
    /// The record is re-verified against the rule's field specs first,
    /// so a record built for one rule cannot be replayed against
    /// another rule with a different shape.
    pub fn evaluate(&self, rule_id: &str, record: &InputRecord) -> Result<EvaluationResult> {
        let rule = self.catalog.get(rule_id)?;
        let record = verify_record(rule, record)?;
        let outcome = eval_predicate(&rule.predicate, &record)?;
        debug!(rule = %rule.id, outcome, "rule evaluated");
        Ok(EvaluationResult {
            rule_id: rule.id.clone(),
            outcome,
            action: rule.action.clone(),
            record,
        })
    }

    /// Validate raw input and evaluate in one step
    pub fn check(&self, rule_id: &str, raw: &HashMap<String, String>) -> Result<EvaluationResult> {
        let rule = self.catalog.get(rule_id)?;
        let record = validate(rule, raw)?;
        let outcome = eval_predicate(&rule.predicate, &record)?;
        debug!(rule = %rule.id, outcome, "rule checked");
        Ok(EvaluationResult {
            rule_id: rule.id.clone(),
            outcome,
            action: rule.action.clone(),
            record,
        })
    }

    /// Run every catalog rule against its raw input from `inputs`
    ///
    /// Entries come back in catalog order, one per rule. A rule with no
    /// entry in `inputs` is validated against an empty map, so required
    /// fields surface as a `Skipped` entry rather than a panic or a
    /// silent omission. Failures never abort the batch.
    pub fn evaluate_all(
        &self,
        inputs: &HashMap<String, HashMap<String, String>>,
    ) -> Vec<BatchEntry> {
        let empty = HashMap::new();
        self.catalog
            .all()
            .iter()
            .map(|rule| {
                let raw = inputs.get(&rule.id).unwrap_or(&empty);
                match self.check(&rule.id, raw) {
                    Ok(result) => BatchEntry::evaluated(result),
                    Err(err) => {
                        warn!(rule = %rule.id, error = %err, "rule skipped in batch run");
                        BatchEntry::skipped(rule.id.clone(), err)
                    }
                }
            })
            .collect()
    }

    /// Run a batch and fold the entries into a summary
    pub fn evaluate_all_with_summary(
        &self,
        inputs: &HashMap<String, HashMap<String, String>>,
    ) -> (Vec<BatchEntry>, Summary) {
        let entries = self.evaluate_all(inputs);
        let summary = Summary::from_entries(&entries);
        (entries, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use plausi_core::Value;

    fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_list_rules_matches_catalog() {
        let engine = Engine::new().unwrap();
        let infos = engine.list_rules();
        assert_eq!(infos.len(), engine.rules().len());
        assert_eq!(infos[0].id, "suppressed-until-next-video-update");
        assert_eq!(infos[0].action, "Disqualifies for AEB");
    }

    #[test]
    fn test_check_boolean_rule_hit_and_miss() {
        let engine = Engine::new().unwrap();

        let hit = engine
            .check(
                "suppressed-until-next-video-update",
                &raw(&[("isSuppressedUntilNextVideoUpdate", "true")]),
            )
            .unwrap();
        assert!(hit.outcome);
        assert_eq!(hit.action, "Disqualifies for AEB");

        let miss = engine
            .check(
                "suppressed-until-next-video-update",
                &raw(&[("isSuppressedUntilNextVideoUpdate", "false")]),
            )
            .unwrap();
        assert!(!miss.outcome);
    }

    #[test]
    fn test_evaluate_verifies_record_shape() {
        let engine = Engine::new().unwrap();
        let record = InputRecord::new().with("dyObj", Value::Number(3.0));
        let err = engine
            .evaluate("moving-towards-ego-lane", &record)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField {
                rule: "moving-towards-ego-lane".to_string(),
                field: "vyObjRel".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_rule_id() {
        let engine = Engine::new().unwrap();
        let err = engine.check("no-such-rule", &raw(&[])).unwrap_err();
        assert_eq!(err, EngineError::NotFound("no-such-rule".to_string()));
    }

    #[test]
    fn test_threshold_defaults_fill_in_check() {
        let engine = Engine::new().unwrap();
        // velocityThreshold and ratioThreshold left out; defaults 5.0/0.3
        let result = engine
            .check(
                "fast-wnj-measurement-ratio",
                &raw(&[
                    ("absVelOverGround", "6"),
                    ("filterType", "CA"),
                    ("numCyclesExisting", "20"),
                    ("totalNumSensorUpdates", "4"),
                ]),
            )
            .unwrap();
        assert!(result.outcome);
        assert_eq!(
            result.record.get("ratioThreshold"),
            Some(&Value::Number(0.3))
        );
    }
}
