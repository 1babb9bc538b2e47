//! End-to-end scenarios over the standard catalog

use plausi_core::CoreError;
use plausi_engine::{Engine, EngineError, Outcome, Summary, Value};
use std::collections::HashMap;

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_ego_lane_rule_fires_on_either_relative_or_ground_velocity() {
    let engine = Engine::new().unwrap();

    // dyObj * vyObjRel = -3 satisfies the first branch
    let result = engine
        .check(
            "moving-towards-ego-lane",
            &raw(&[("dyObj", "3"), ("vyObjRel", "-1"), ("vyObjOverGround", "2")]),
        )
        .unwrap();
    assert!(result.outcome);

    // Neither product is negative
    let result = engine
        .check(
            "moving-towards-ego-lane",
            &raw(&[("dyObj", "3"), ("vyObjRel", "1"), ("vyObjOverGround", "2")]),
        )
        .unwrap();
    assert!(!result.outcome);
}

#[test]
fn test_fast_wnj_ratio_rule_with_default_thresholds() {
    let engine = Engine::new().unwrap();

    // ratio = 4 / 20 = 0.2, below the 0.3 default
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

    // CV filter type breaks the conjunction
    let result = engine
        .check(
            "fast-wnj-measurement-ratio",
            &raw(&[
                ("absVelOverGround", "6"),
                ("filterType", "CV"),
                ("numCyclesExisting", "20"),
                ("totalNumSensorUpdates", "4"),
            ]),
        )
        .unwrap();
    assert!(!result.outcome);
}

#[test]
fn test_caller_supplied_threshold_overrides_default() {
    let engine = Engine::new().unwrap();

    // ratio 0.2 is no longer below an explicit 0.1 threshold
    let result = engine
        .check(
            "fast-wnj-measurement-ratio",
            &raw(&[
                ("absVelOverGround", "6"),
                ("filterType", "CA"),
                ("numCyclesExisting", "20"),
                ("totalNumSensorUpdates", "4"),
                ("ratioThreshold", "0.1"),
            ]),
        )
        .unwrap();
    assert!(!result.outcome);
}

#[test]
fn test_zero_cycle_count_surfaces_as_division_hazard() {
    let engine = Engine::new().unwrap();
    let err = engine
        .check(
            "fast-wnj-measurement-ratio",
            &raw(&[
                ("absVelOverGround", "6"),
                ("filterType", "CA"),
                ("numCyclesExisting", "0"),
                ("totalNumSensorUpdates", "4"),
            ]),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Eval(CoreError::DivisionHazard(_))
    ));
}

#[test]
fn test_video_ghost_rule_conjunction() {
    let engine = Engine::new().unwrap();
    let input = raw(&[
        ("totalNumSensorUpdates", "8"),
        ("updatesSinceLastSensor", "4"),
        ("numMicroDopplerCycles", "1"),
        ("expectedVrHighEnough", "false"),
        ("rcs", "-12"),
    ]);
    assert!(engine.check("probable-video-ghost", &input).unwrap().outcome);

    // Flipping the negated boolean kills the conjunction
    let mut input = input;
    input.insert("expectedVrHighEnough".to_string(), "true".to_string());
    assert!(!engine.check("probable-video-ghost", &input).unwrap().outcome);
}

#[test]
fn test_dx_innovation_threshold_arithmetic() {
    let engine = Engine::new().unwrap();

    // 1.5 + 60/100 + 8/20 + 2/10 = 2.7 > 2.5 with range exactly 60
    let result = engine
        .check(
            "dx-innovation-threshold",
            &raw(&[
                ("stateX", "60"),
                ("stateY", "0"),
                ("rcs", "8"),
                ("vyUnreliableAccumulated", "2"),
                ("numCyclesExisting", "6"),
            ]),
        )
        .unwrap();
    assert!(result.outcome);

    // Dropping rcs to 0 gives 2.3, below the cutoff
    let result = engine
        .check(
            "dx-innovation-threshold",
            &raw(&[
                ("stateX", "60"),
                ("stateY", "0"),
                ("rcs", "0"),
                ("vyUnreliableAccumulated", "2"),
                ("numCyclesExisting", "6"),
            ]),
        )
        .unwrap();
    assert!(!result.outcome);
}

#[test]
fn test_orientation_consistency_uses_unnormalized_angle_diff() {
    let engine = Engine::new().unwrap();

    // Velocity heading is -170 degrees, yaw 170: the raw difference is
    // 340, well above the 90 degree default even though the geometric
    // separation is only 20 degrees.
    let vx = 170.0_f64.to_radians().cos();
    let vy = -(170.0_f64.to_radians().sin());
    let result = engine
        .check(
            "orientation-consistency",
            &raw(&[
                ("absVelOverGround", "3"),
                ("numCyclesExisting", "12"),
                ("yawAngle", "170"),
                ("velocityX", &vx.to_string()),
                ("velocityY", &vy.to_string()),
                ("orientationUnreliableCount", "6"),
            ]),
        )
        .unwrap();
    assert!(result.outcome);
}

#[test]
fn test_inconsistent_alpha_magnitude_gate() {
    let engine = Engine::new().unwrap();
    let input = |x: &str| {
        raw(&[
            ("radarRawAlphaInnovation", "0.5"),
            ("videoRawAlphaInnovation", "0.1"),
            ("stateX", x),
            ("stateY", "0"),
            ("updatesSinceLastSensor", "2"),
        ])
    };

    assert!(engine.check("inconsistent-alpha", &input("40")).unwrap().outcome);
    // Out of the 60 m range gate
    assert!(!engine.check("inconsistent-alpha", &input("70")).unwrap().outcome);
}

#[test]
fn test_missing_field_names_first_absent_required_field() {
    let engine = Engine::new().unwrap();
    let err = engine
        .check("moving-towards-ego-lane", &raw(&[("dyObj", "3")]))
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
fn test_evaluation_is_deterministic() {
    let engine = Engine::new().unwrap();
    let input = raw(&[
        ("absVelOverGround", "6"),
        ("filterType", "CA"),
        ("numCyclesExisting", "20"),
        ("totalNumSensorUpdates", "4"),
    ]);
    let first = engine.check("fast-wnj-measurement-ratio", &input).unwrap();
    for _ in 0..10 {
        let again = engine.check("fast-wnj-measurement-ratio", &input).unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn test_validate_then_evaluate_matches_check() {
    let engine = Engine::new().unwrap();
    let input = raw(&[
        ("totalNumSensorUpdates", "8"),
        ("updatesSinceLastSensor", "4"),
        ("numMicroDopplerCycles", "1"),
        ("expectedVrHighEnough", "false"),
        ("rcs", "-12"),
    ]);
    let record = engine.validate("probable-video-ghost", &input).unwrap();
    assert_eq!(
        record.get("rcs"),
        Some(&Value::Number(-12.0))
    );
    let split = engine.evaluate("probable-video-ghost", &record).unwrap();
    let fused = engine.check("probable-video-ghost", &input).unwrap();
    assert_eq!(split, fused);
}

#[test]
fn test_batch_run_covers_catalog_in_order_and_isolates_failures() {
    let engine = Engine::new().unwrap();

    let mut inputs = HashMap::new();
    inputs.insert(
        "suppressed-until-next-video-update".to_string(),
        raw(&[("isSuppressedUntilNextVideoUpdate", "true")]),
    );
    inputs.insert(
        "moving-towards-ego-lane".to_string(),
        raw(&[("dyObj", "3"), ("vyObjRel", "1"), ("vyObjOverGround", "2")]),
    );
    // Division hazard stays contained in its own entry
    inputs.insert(
        "fast-wnj-measurement-ratio".to_string(),
        raw(&[
            ("absVelOverGround", "6"),
            ("filterType", "CA"),
            ("numCyclesExisting", "0"),
            ("totalNumSensorUpdates", "4"),
        ]),
    );

    let (entries, summary) = engine.evaluate_all_with_summary(&inputs);

    assert_eq!(entries.len(), engine.rules().len());
    for (entry, rule) in entries.iter().zip(engine.rules()) {
        assert_eq!(entry.rule_id, rule.id);
    }

    assert!(entries[0].is_hit());
    assert!(matches!(&entries[2].outcome, Outcome::Evaluated(r) if !r.outcome));
    assert!(matches!(
        &entries[6].outcome,
        Outcome::Skipped {
            reason: EngineError::Eval(CoreError::DivisionHazard(_))
        }
    ));

    assert_eq!(
        summary,
        Summary {
            hits: 1,
            misses: 1,
            skipped: 38,
        }
    );
    assert_eq!(summary.total(), 40);
}

#[test]
fn test_rules_without_input_skip_with_missing_field() {
    let engine = Engine::new().unwrap();
    let entries = engine.evaluate_all(&HashMap::new());
    assert_eq!(entries.len(), 40);
    for entry in &entries {
        assert!(matches!(
            &entry.outcome,
            Outcome::Skipped {
                reason: EngineError::MissingField { .. }
            }
        ));
    }
}

#[test]
fn test_rule_info_exposes_form_metadata() {
    let engine = Engine::new().unwrap();
    let infos = engine.list_rules();
    let wnj = infos
        .iter()
        .find(|i| i.id == "fast-wnj-measurement-ratio")
        .unwrap();
    assert_eq!(wnj.name, "applyIsMeasuredRatioCheckForFastWnj");
    assert_eq!(wnj.fields.len(), 6);
    assert_eq!(wnj.action, "Disqualifies for AEB");

    let json = serde_json::to_value(wnj).unwrap();
    assert_eq!(json["id"], "fast-wnj-measurement-ratio");
    assert!(json["fields"].as_array().unwrap().len() == 6);
}
