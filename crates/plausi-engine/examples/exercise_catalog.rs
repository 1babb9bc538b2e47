//! Exercise Catalog Example
//!
//! Walks the standard catalog end to end: lists the rules, checks a few
//! of them against hand-picked raw inputs, and runs a batch where one
//! rule is deliberately fed a zero cycle count to show how a division
//! hazard is contained in its own report entry.

use plausi_engine::{Engine, Outcome, Summary};
use std::collections::HashMap;

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plausi_engine=debug".parse()?),
        )
        .init();

    let engine = Engine::new()?;

    println!("{}", "=".repeat(80));
    println!("Plausi Catalog ({} rules)", engine.rules().len());
    println!("{}", "=".repeat(80));
    for info in engine.list_rules() {
        println!("  {:<45} {}", info.id, info.action);
    }
    println!();

    // A boolean suppression flag, the simplest rule in the catalog
    println!("{}", "-".repeat(80));
    println!("Check: suppressed-until-next-video-update");
    println!("{}", "-".repeat(80));
    let result = engine.check(
        "suppressed-until-next-video-update",
        &raw(&[("isSuppressedUntilNextVideoUpdate", "true")]),
    )?;
    println!("  outcome: {} ({})", result.outcome, result.action);
    println!();

    // The WNJ measurement ratio rule with both thresholds defaulted
    println!("{}", "-".repeat(80));
    println!("Check: fast-wnj-measurement-ratio (default thresholds)");
    println!("{}", "-".repeat(80));
    let result = engine.check(
        "fast-wnj-measurement-ratio",
        &raw(&[
            ("absVelOverGround", "6"),
            ("filterType", "CA"),
            ("numCyclesExisting", "20"),
            ("totalNumSensorUpdates", "4"),
        ]),
    )?;
    println!("  outcome: {} ({})", result.outcome, result.action);
    println!("  record:  {}", serde_json::to_string(&result.record)?);
    println!();

    // Batch run with one poisoned input
    println!("{}", "-".repeat(80));
    println!("Batch run (one input with numCyclesExisting = 0)");
    println!("{}", "-".repeat(80));
    let mut inputs = HashMap::new();
    inputs.insert(
        "suppressed-until-next-video-update".to_string(),
        raw(&[("isSuppressedUntilNextVideoUpdate", "true")]),
    );
    inputs.insert(
        "moving-towards-ego-lane".to_string(),
        raw(&[("dyObj", "3"), ("vyObjRel", "-1"), ("vyObjOverGround", "2")]),
    );
    inputs.insert(
        "fast-wnj-measurement-ratio".to_string(),
        raw(&[
            ("absVelOverGround", "6"),
            ("filterType", "CA"),
            ("numCyclesExisting", "0"),
            ("totalNumSensorUpdates", "4"),
        ]),
    );

    let entries = engine.evaluate_all(&inputs);
    for entry in &entries {
        match &entry.outcome {
            Outcome::Evaluated(result) => {
                println!("  {:<45} outcome={}", entry.rule_id, result.outcome)
            }
            Outcome::Skipped { reason } => {
                println!("  {:<45} skipped: {}", entry.rule_id, reason)
            }
        }
    }

    let summary = Summary::from_entries(&entries);
    println!();
    println!(
        "Summary: {} hits, {} misses, {} skipped ({} total)",
        summary.hits,
        summary.misses,
        summary.skipped,
        summary.total()
    );

    Ok(())
}
