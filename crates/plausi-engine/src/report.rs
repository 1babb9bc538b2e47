//! Batch evaluation reporting
//!
//! A batch run produces one entry per catalog rule, in catalog order.
//! Rules whose input failed validation or whose predicate hit an
//! evaluation hazard are carried as `Skipped` entries instead of
//! aborting the batch.

use crate::error::EngineError;
use plausi_core::EvaluationResult;
use serde::Serialize;

/// Per-rule outcome of a batch run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The rule evaluated cleanly
    Evaluated(EvaluationResult),
    /// Validation or evaluation failed; the error is kept verbatim
    Skipped {
        #[serde(serialize_with = "serialize_error")]
        reason: EngineError,
    },
}

fn serialize_error<S>(err: &EngineError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&err.to_string())
}

/// One row of a batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub rule_id: String,
    pub outcome: Outcome,
}

impl BatchEntry {
    pub fn evaluated(result: EvaluationResult) -> Self {
        Self {
            rule_id: result.rule_id.clone(),
            outcome: Outcome::Evaluated(result),
        }
    }

    pub fn skipped(rule_id: impl Into<String>, reason: EngineError) -> Self {
        Self {
            rule_id: rule_id.into(),
            outcome: Outcome::Skipped { reason },
        }
    }

    /// Whether this entry is a clean evaluation that fired
    pub fn is_hit(&self) -> bool {
        matches!(&self.outcome, Outcome::Evaluated(r) if r.outcome)
    }
}

/// Aggregate counts over a batch report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub hits: usize,
    pub misses: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_entries(entries: &[BatchEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            match &entry.outcome {
                Outcome::Evaluated(result) if result.outcome => acc.hits += 1,
                Outcome::Evaluated(_) => acc.misses += 1,
                Outcome::Skipped { .. } => acc.skipped += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.hits + self.misses + self.skipped
    }

    /// Share of cleanly evaluated rules that fired, zero for an empty batch
    pub fn hit_rate(&self) -> f64 {
        let evaluated = self.hits + self.misses;
        if evaluated == 0 {
            0.0
        } else {
            self.hits as f64 / evaluated as f64
        }
    }
}
