//! The fixed rule catalog
//!
//! All plausibility checks of the perception post-processing stage, in
//! declaration order. Thresholds that the second catalog revision made
//! caller-tunable are declared as defaulted threshold fields; all other
//! thresholds stay literal in the expression trees.

use crate::error::{EngineError, Result};
use plausi_core::{Expression, FieldSpec, RuleDefinition};
use std::collections::{HashMap, HashSet};

/// Ordered, immutable set of rule definitions with id lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<RuleDefinition>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build the standard catalog and verify its self-consistency
    pub fn standard() -> Result<Self> {
        Self::from_rules(definitions())
    }

    /// Build a catalog from explicit definitions
    ///
    /// Fails with `UndeclaredField` when a predicate reads a field its
    /// rule does not declare. Duplicate ids are rejected the same way a
    /// duplicate key would be at compile time in the original table.
    pub fn from_rules(rules: Vec<RuleDefinition>) -> Result<Self> {
        let mut index = HashMap::with_capacity(rules.len());

        for (pos, rule) in rules.iter().enumerate() {
            let declared: HashSet<&str> = rule.fields.iter().map(|f| f.name.as_str()).collect();
            for referenced in rule.predicate.referenced_fields() {
                if !declared.contains(referenced.as_str()) {
                    return Err(EngineError::UndeclaredField {
                        rule: rule.id.clone(),
                        field: referenced,
                    });
                }
            }

            if index.insert(rule.id.clone(), pos).is_some() {
                return Err(EngineError::NotFound(format!(
                    "duplicate rule id '{}'",
                    rule.id
                )));
            }
        }

        Ok(Self { rules, index })
    }

    /// All rules in declaration order
    pub fn all(&self) -> &[RuleDefinition] {
        &self.rules
    }

    /// Look up a rule by id
    pub fn get(&self, id: &str) -> Result<&RuleDefinition> {
        self.index
            .get(id)
            .map(|&pos| &self.rules[pos])
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn fld(name: &str) -> Expression {
    Expression::field(name)
}

fn num(value: f64) -> Expression {
    Expression::num(value)
}

/// The 40 plausibility checks, in their original order
fn definitions() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "suppressed-until-next-video-update",
            "applySuppressionUntilNextVideoUpdateCheck",
            fld("isSuppressedUntilNextVideoUpdate"),
        )
        .with_description("Checks if object is suppressed until next video update")
        .with_fields(vec![FieldSpec::boolean(
            "isSuppressedUntilNextVideoUpdate",
            "Is Suppressed Until Next Video Update?",
        )])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "video-otc-post-processing",
            "applyPostProcessVideoOtcCheck",
            fld("isSuppressedDueToVideoOtc"),
        )
        .with_description("Checks if object is suppressed due to video OTC post-processing")
        .with_fields(vec![FieldSpec::boolean(
            "isSuppressedDueToVideoOtc",
            "Is Suppressed Due To Video OTC?",
        )])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "moving-towards-ego-lane",
            "isMovingTowardsEgoLane",
            fld("dyObj")
                .mul(fld("vyObjRel"))
                .lt(num(0.0))
                .or(fld("dyObj").mul(fld("vyObjOverGround")).lt(num(0.0))),
        )
        .with_description("Determines if object is moving towards ego lane")
        .with_fields(vec![
            FieldSpec::number("dyObj", "dyObj (lateral distance)"),
            FieldSpec::number("vyObjRel", "vyObjRel (relative lateral velocity)"),
            FieldSpec::number("vyObjOverGround", "vyObjOverGround (lateral velocity over ground)"),
        ])
        .with_action("Returns boolean indicating movement towards ego lane"),
        RuleDefinition::new(
            "probable-video-ghost",
            "isDepObjProbablyVideoGhost",
            Expression::all(vec![
                fld("totalNumSensorUpdates").gt(num(5.0)),
                fld("updatesSinceLastSensor").gt(num(3.0)),
                fld("numMicroDopplerCycles").lt(num(2.0)),
                fld("expectedVrHighEnough").not(),
                fld("rcs").lt(num(-10.0)),
            ]),
        )
        .with_description("Checks if dependent object is probably a video ghost")
        .with_fields(vec![
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::number("numMicroDopplerCycles", "Number of Micro Doppler Cycles"),
            FieldSpec::boolean("expectedVrHighEnough", "Expected VR High Enough?"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
        ])
        .with_action("Returns boolean indicating if object is probably a video ghost"),
        RuleDefinition::new(
            "unreliable-angular-velocity",
            "applyUnreliableAngularVelocityCheck",
            Expression::all(vec![
                fld("probHasBeenObservedMoving").lt(num(0.3)),
                fld("probIsCurrentlyMoving").lt(num(0.2)),
                fld("numCyclesExisting").gt(num(10.0)),
                fld("absVelOverGround").gt(num(2.0)),
                fld("isObjectVru").not(),
            ]),
        )
        .with_description("Checks for unreliable angular velocity")
        .with_fields(vec![
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
            FieldSpec::number("probIsCurrentlyMoving", "Probability Is Currently Moving (0-1)"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
        ])
        .with_action("Disqualifies for AEB or VY-dependent functions"),
        RuleDefinition::new(
            "stationary-location-high-micro-doppler",
            "applyUpdatedWithStatLocWithHighMDopplerWithOutgoingVrCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("absVelOverGroundX").lt(num(0.2)),
                fld("absVelOverGroundY").gt(num(1.0)),
                fld("stateY").abs().lt(num(0.5)),
                fld("isUpdatedWithStatLocWithHighMD"),
            ]),
        )
        .with_description("Checks VRU updated with stationary location and high micro doppler")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("absVelOverGroundX", "Absolute Velocity Over Ground X"),
            FieldSpec::number("absVelOverGroundY", "Absolute Velocity Over Ground Y"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::boolean("isUpdatedWithStatLocWithHighMD", "Is Updated With Stat Loc With High MD?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "fast-wnj-measurement-ratio",
            "applyIsMeasuredRatioCheckForFastWnj",
            Expression::all(vec![
                fld("absVelOverGround").gt(fld("velocityThreshold")),
                fld("filterType").eq(Expression::choice("CA")),
                Expression::ratio(fld("totalNumSensorUpdates"), fld("numCyclesExisting"))
                    .lt(fld("ratioThreshold")),
            ]),
        )
        .with_description("Checks measurement ratio for fast crossing WNJ objects")
        .with_fields(vec![
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("velocityThreshold", "Velocity Threshold").with_default(5.0),
            FieldSpec::number("ratioThreshold", "Measurement Ratio Threshold").with_default(0.3),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "water-sprinklers-acc",
            "applyWaterSprinklersCheckAcc",
            Expression::all(vec![
                fld("isOnlyUpdatedBySensorX"),
                fld("avgDxInnovation").gt(num(2.0)),
                fld("rcs").lt(num(-15.0)),
                fld("pNonObstacleRCS").gt(num(0.7)),
            ]),
        )
        .with_description("Checks for water sprinkler characteristics for ACC")
        .with_fields(vec![
            FieldSpec::boolean("isOnlyUpdatedBySensorX", "Is Only Updated By Sensor X?"),
            FieldSpec::number("avgDxInnovation", "Average Dx Innovation"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("pNonObstacleRCS", "P Non-Obstacle RCS (0-1)"),
        ])
        .with_action("Modifies object probabilities"),
        RuleDefinition::new(
            "non-crossing-object",
            "applyNonCrossingObjectCheck",
            Expression::all(vec![
                fld("probIsCurrentlyMoving").lt(num(0.2)),
                fld("probHasBeenObservedMoving").lt(num(0.3)),
                fld("totalNumSensorUpdates").gt(num(15.0)),
                fld("numMicroDopplerCycles").lt(num(3.0)),
                fld("totalNumCyclesWithOncomingLocations").gt(num(10.0)),
            ]),
        )
        .with_description("Checks for objects appearing to cross but probably not moving")
        .with_fields(vec![
            FieldSpec::number("probIsCurrentlyMoving", "Probability Is Currently Moving (0-1)"),
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("numMicroDopplerCycles", "Number of Micro Doppler Cycles"),
            FieldSpec::number("totalNumCyclesWithOncomingLocations", "Total Cycles With Oncoming Locations"),
        ])
        .with_action("Disqualifies for VY-dependent functions"),
        RuleDefinition::new(
            "water-sprinkles",
            "applyWaterSprinklesCheck",
            Expression::all(vec![
                fld("hasOnlyBeenUpdatedBySensorX"),
                fld("avgDxInnovation").gt(num(1.5)),
                fld("rcs").lt(num(-12.0)),
                fld("elevation").lt(num(-5.0)),
                fld("pNonObstacleRCS").gt(num(0.6)),
            ]),
        )
        .with_description("Checks for water sprinkler/ground reflection characteristics")
        .with_fields(vec![
            FieldSpec::boolean("hasOnlyBeenUpdatedBySensorX", "Has Only Been Updated By Sensor X?"),
            FieldSpec::number("avgDxInnovation", "Average Dx Innovation"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
            FieldSpec::number("pNonObstacleRCS", "P Non-Obstacle RCS (0-1)"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "radar-only-longitudinal-measurement-ratio",
            "applyIsMeasuredRatioCheckForRadarOnlyLongitudinallyMoving",
            Expression::all(vec![
                fld("isOnlyUpdatedBySensorX"),
                fld("stateY").abs().gt(num(2.0)),
                Expression::ratio(fld("totalNumSensorUpdates"), fld("numCyclesExisting"))
                    .lt(fld("ratioThreshold")),
                fld("numCyclesExisting").gt(num(8.0)),
            ]),
        )
        .with_description("Checks measurement ratio for radar-only longitudinally moving objects")
        .with_fields(vec![
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::boolean("isOnlyUpdatedBySensorX", "Is Only Updated By Sensor X?"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("ratioThreshold", "Measurement Ratio Threshold").with_default(0.4),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "micro-doppler",
            "applyMicroDopplerCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("absVelOverGround").gt(num(1.0)),
                fld("expectedVrHighEnough"),
                fld("totalNumSensorUpdates").gt(num(10.0)),
                fld("numMicroDopplerCycles").lt(num(2.0)),
                fld("numCyclesExisting").gt(num(15.0)),
            ]),
        )
        .with_description("Checks VRU objects for expected micro-doppler signatures")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
            FieldSpec::boolean("expectedVrHighEnough", "Expected VR High Enough?"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("numMicroDopplerCycles", "Number of Micro Doppler Cycles"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "radar-only-rcs-dr-innovation-limit",
            "applyRadarOnlyRcsAndDrInnovationLimit",
            Expression::all(vec![
                fld("isOnlyUpdatedBySensorX"),
                fld("avgDxInnovation").gt(num(3.0)),
                fld("rcs").lt(num(-18.0)),
            ]),
        )
        .with_description("Checks radar-only objects with high innovation and low RCS")
        .with_fields(vec![
            FieldSpec::boolean("isOnlyUpdatedBySensorX", "Is Only Updated By Sensor X?"),
            FieldSpec::number("avgDxInnovation", "Average Dx Innovation"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "elevation",
            "applyElevationCheck",
            Expression::all(vec![
                fld("stateX").lt(num(50.0)),
                fld("elevationIsValid"),
                fld("elevation").gt(num(15.0)),
                fld("updatesSinceLastSensor").lt(num(5.0)),
                fld("isObjectVru").not(),
            ]),
        )
        .with_description("Checks objects with inappropriate elevation (too high)")
        .with_fields(vec![
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::boolean("elevationIsValid", "Elevation Is Valid?"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "non-plausible-location",
            "applyNonPlausibleLocationChecks",
            Expression::all(vec![
                fld("yawAngle").abs().gt(num(45.0)),
                fld("nonPlausibleLocationCnt").gt(num(3.0)),
                fld("filterType").eq(Expression::choice("CA")),
                fld("wExistOfAssociatedVideo").lt(num(0.3)),
            ]),
        )
        .with_description("Checks trucks with non-plausible locations")
        .with_fields(vec![
            FieldSpec::number("yawAngle", "Yaw Angle (degrees)"),
            FieldSpec::number("nonPlausibleLocationCnt", "Non-Plausible Location Count"),
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
            FieldSpec::number("wExistOfAssociatedVideo", "W Exist of Associated Video (0-1)"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "four-plus-wheeler",
            "applyFourpluswheelerChecks",
            Expression::all(vec![
                fld("totalNumSensorUpdates").gt(num(20.0)),
                fld("velocityX").abs().gt(num(10.0)),
                fld("stateX").gt(num(100.0)),
                fld("avgDxInnovation").gt(num(2.5)),
                fld("rcs").gt(num(10.0)),
                fld("elevation").gt(num(20.0)),
                fld("probHasBeenObservedMoving").lt(num(0.4)),
            ]),
        )
        .with_description("Checks various implausible characteristics for 4+ wheeler vehicles")
        .with_fields(vec![
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("velocityX", "Velocity X"),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("avgDxInnovation", "Average Dx Innovation"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
        ])
        .with_action("Disqualifies for AEB and/or ACC"),
        RuleDefinition::new(
            "split-check",
            "applySplitCheckDisqualifyObjectForFunctions",
            Expression::all(vec![
                fld("isObjectVru").not(),
                fld("splitCounter").gt(num(2.0)),
                fld("stoppingSplitCounter").gt(num(1.0)),
            ]),
        )
        .with_description("Checks non-VRU objects with split detection")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("splitCounter", "Split Counter"),
            FieldSpec::number("stoppingSplitCounter", "Stopping Split Counter"),
        ])
        .with_action("Disqualifies for AEB and ACC"),
        RuleDefinition::new(
            "orientation-consistency",
            "applyOrientationConsistencyCheck",
            Expression::all(vec![
                fld("absVelOverGround").gt(num(2.0)),
                fld("numCyclesExisting").gt(num(10.0)),
                Expression::angle_diff_deg(fld("velocityY"), fld("velocityX"), fld("yawAngle"))
                    .gt(fld("angleDiffThreshold")),
                fld("orientationUnreliableCount").gt(num(5.0)),
            ]),
        )
        .with_description("Checks objects with inconsistent orientation vs velocity direction")
        .with_fields(vec![
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("yawAngle", "Yaw Angle (degrees)"),
            FieldSpec::number("velocityX", "Velocity X"),
            FieldSpec::number("velocityY", "Velocity Y"),
            FieldSpec::number("orientationUnreliableCount", "Orientation Unreliable Count"),
            FieldSpec::number("angleDiffThreshold", "Angle Difference Threshold (degrees)")
                .with_default(90.0),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "unreliable-orientation-count",
            "modifyUnreliableOrientationCount",
            Expression::all(vec![
                fld("isObjectVru").not(),
                fld("numCyclesNoOrientationUpdate").gt(num(5.0)),
                fld("orientationUnreliableCount").lt(num(10.0)),
                fld("egoYawRate").abs().gt(num(0.2)),
            ]),
        )
        .with_description("Modifies orientation unreliable count for non-VRU objects")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("numCyclesNoOrientationUpdate", "Number of Cycles No Orientation Update"),
            FieldSpec::number("orientationUnreliableCount", "Orientation Unreliable Count"),
            FieldSpec::number("egoYawRate", "Ego Yaw Rate (rad/s)"),
        ])
        .with_action("Modifies orientation unreliable count"),
        RuleDefinition::new(
            "stationary-vru-video-ghost",
            "applyStationaryVruVideoGhostCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("absVelOverGround").lt(num(0.5)),
                fld("rcs").gt(num(0.0)),
                fld("wExistOfAssociatedVideo").lt(num(0.2)),
                fld("updatesSinceLastSensor").lt(num(3.0)),
            ]),
        )
        .with_description("Checks stationary VRU with high RCS and low video existence")
        .with_fields(vec![
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("wExistOfAssociatedVideo", "W Exist of Associated Video (0-1)"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "innovation",
            "applyInnovationCheck",
            Expression::all(vec![
                Expression::magnitude(fld("stateX"), fld("stateY")).lt(num(80.0)),
                fld("avgDxInnovation").gt(num(2.0)),
                fld("isVruObject").not(),
            ]),
        )
        .with_description("Checks objects with high dx innovation in relevant range")
        .with_fields(vec![
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("avgDxInnovation", "Average Dx Innovation"),
            FieldSpec::boolean("isVruObject", "Is VRU Object?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "dx-innovation-threshold",
            "calcDxInnovationThreshold",
            Expression::all(vec![
                num(1.5)
                    .add(Expression::magnitude(fld("stateX"), fld("stateY")).div(num(100.0)))
                    .add(fld("rcs").div(num(20.0)))
                    .add(fld("vyUnreliableAccumulated").div(num(10.0)))
                    .gt(num(2.5)),
                fld("numCyclesExisting").gt(num(5.0)),
            ]),
        )
        .with_description("Calculates threshold value for dx innovation")
        .with_fields(vec![
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("vyUnreliableAccumulated", "VY Unreliable Accumulated"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
        ])
        .with_action("Returns Float32 threshold value for dx innovation"),
        RuleDefinition::new(
            "implausible-vy-vru",
            "applyImplausibleVyVruCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("filterType").eq(Expression::choice("LA")),
                fld("absVelOverGroundY").gt(num(3.0)),
                fld("egoYawRate").abs().lt(num(0.1)),
            ]),
        )
        .with_description("Checks VRU with LA filter type and high VY velocity")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("absVelOverGroundY", "Absolute Velocity Over Ground Y"),
            FieldSpec::number("egoYawRate", "Ego Yaw Rate (rad/s)"),
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
        ])
        .with_action("Disqualifies for AEB and ACC"),
        RuleDefinition::new(
            "sensor-based-innovation",
            "applySensorBasedInnoCheck",
            Expression::all(vec![
                fld("badSensorBasedInnoCount").gt(num(5.0)),
                Expression::magnitude(fld("stateX"), fld("stateY")).lt(num(100.0)),
                fld("isObjectVru").not(),
            ]),
        )
        .with_description("Checks objects with high bad sensor innovation count")
        .with_fields(vec![
            FieldSpec::number("badSensorBasedInnoCount", "Bad Sensor Based Innovation Count"),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "implausible-video-ttc-vru",
            "applyImplausibleVideoTtcForVru",
            Expression::all(vec![
                fld("isVru"),
                fld("updatesSinceLastSensor").lt(num(5.0)),
                fld("videoInvTtc").gt(num(0.5)),
            ]),
        )
        .with_description("Checks VRU with implausible video TTC")
        .with_fields(vec![
            FieldSpec::boolean("isVru", "Is VRU?"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::number("videoInvTtc", "Video Inverse TTC"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "vy-inconsistent",
            "applyVyInconsistentCheck",
            Expression::all(vec![
                fld("isVru"),
                fld("vyInconsistent"),
                fld("filterType").eq(Expression::choice("LA")),
                fld("stateX").lt(num(60.0)),
                fld("vyUnreliableAccumulated").gt(num(5.0)),
            ]),
        )
        .with_description("Checks VRU with inconsistent VY measurements")
        .with_fields(vec![
            FieldSpec::boolean("vyInconsistent", "VY Inconsistent?"),
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("vyUnreliableAccumulated", "VY Unreliable Accumulated"),
            FieldSpec::boolean("isVru", "Is VRU?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "video-handle-shared",
            "applyVideoHandleSharedCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("absVelOverGround").lt(num(0.5)),
                fld("probHasBeenObservedMoving").lt(num(0.2)),
                fld("updatesSinceLastSensor").lt(num(3.0)),
                fld("isRecentlyUsedVideoHandleValid"),
            ]),
        )
        .with_description("Checks stationary VRU sharing video handle with moving object")
        .with_fields(vec![
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::boolean("isRecentlyUsedVideoHandleValid", "Is Recently Used Video Handle Valid?"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "bad-sensor-innovation-count",
            "modifyBadSensorBasedInnoCount",
            Expression::all(vec![
                Expression::magnitude(fld("referencePointX"), fld("referencePointY")).lt(num(80.0)),
                fld("radarBasedInnovation").gt(num(2.0)),
                fld("videoBasedInnovation").gt(num(1.5)),
                fld("updatesSinceLastSensor").lt(num(5.0)),
            ]),
        )
        .with_description("Updates bad sensor innovation counter")
        .with_fields(vec![
            FieldSpec::number("referencePointX", "Reference Point X"),
            FieldSpec::number("referencePointY", "Reference Point Y"),
            FieldSpec::number("radarBasedInnovation", "Radar Based Innovation"),
            FieldSpec::number("videoBasedInnovation", "Video Based Innovation"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
        ])
        .with_action("Updates bad sensor innovation counter"),
        RuleDefinition::new(
            "radar-only-nld",
            "applyRadarOnlyNLDCheck",
            Expression::all(vec![
                fld("totalNumSensorUpdates").gt(num(10.0)),
                Expression::magnitude(fld("stateX"), fld("stateY")).gt(num(120.0)),
                Expression::magnitude(fld("velocityX"), fld("velocityY")).lt(num(1.0)),
                fld("numCyclesExisting").gt(num(15.0)),
            ]),
        )
        .with_description("Checks radar-only objects that are NLD candidates")
        .with_fields(vec![
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("velocityX", "Velocity X"),
            FieldSpec::number("velocityY", "Velocity Y"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
        ])
        .with_action("Disqualifies for AEB and ACC"),
        RuleDefinition::new(
            "radar-only-stationary",
            "applyRadarOnlyStationaryCheck",
            Expression::all(vec![
                fld("absVelOverGround").lt(num(0.5)),
                fld("totalNumSensorUpdates").gt(num(8.0)),
                fld("isOnlyRadarUpdated"),
            ]),
        )
        .with_description("Checks radar-only stationary objects")
        .with_fields(vec![
            FieldSpec::number("absVelOverGround", "Absolute Velocity Over Ground"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::boolean("isOnlyRadarUpdated", "Is Only Radar Updated?"),
        ])
        .with_action("Disqualifies for AEB and ACC"),
        RuleDefinition::new(
            "standing-longitudinal-vru-measurement-ratio",
            "applyIsMeasuredRatioCheckForStandingLongiVru",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("filterType").eq(Expression::choice("LA")),
                fld("probHasBeenObservedMoving").lt(num(0.2)),
                fld("probIsCurrentlyMoving").lt(num(0.1)),
                Expression::ratio(fld("numSingleUpdateBySensorX"), fld("numCyclesExisting"))
                    .lt(fld("ratioThreshold")),
            ]),
        )
        .with_description("Checks standing longitudinal VRU with poor measurement history")
        .with_fields(vec![
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
            FieldSpec::number("probIsCurrentlyMoving", "Probability Is Currently Moving (0-1)"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("numSingleUpdateBySensorX", "Number of Single Update By Sensor X"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("ratioThreshold", "Measurement Ratio Threshold").with_default(0.3),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "implausibly-accelerating-vru",
            "applyImplausiblyAcceleratingVruCheck",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("stateX").lt(num(20.0)),
                fld("numCyclesExisting").lt(num(10.0)),
                fld("accelerationX").gt(num(5.0)),
            ]),
        )
        .with_description("Checks close, young VRU with implausibly high forward acceleration")
        .with_fields(vec![
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("accelerationX", "Acceleration X"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "undefined-crossing-vru-from-corner",
            "applyUndefinedCrossingVruFromCorner",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("stateY").abs().gt(num(3.0)),
                fld("stateX").lt(num(30.0)),
                fld("totalNumSensorUpdates").gt(num(5.0)),
                fld("numCyclesExisting").lt(num(15.0)),
                fld("filterType").eq(Expression::choice("CA")),
                fld("probHasBeenObservedMoving").lt(num(0.3)),
            ]),
        )
        .with_description("Checks corner-detected VRU with undefined crossing behavior")
        .with_fields(vec![
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::choice("filterType", "Filter Type", &["CA", "CV", "LA"]),
            FieldSpec::number("probHasBeenObservedMoving", "Probability Has Been Observed Moving (0-1)"),
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "implausible-ped",
            "applyImplausiblePedCheck",
            Expression::all(vec![
                fld("isObjectPedestrian"),
                fld("stateY").abs().gt(num(4.0)),
                fld("numMicroDopplerCycles").lt(num(2.0)),
                fld("rcs").gt(num(10.0)),
                fld("totalNumSensorUpdates").gt(num(15.0)),
                fld("stationaryLocationsOnlyCounter").gt(num(8.0)),
                fld("elevation").gt(num(10.0)),
            ]),
        )
        .with_description("Checks pedestrians with implausible characteristics")
        .with_fields(vec![
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::boolean("isObjectPedestrian", "Is Object Pedestrian?"),
            FieldSpec::number("numMicroDopplerCycles", "Number of Micro Doppler Cycles"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("stationaryLocationsOnlyCounter", "Stationary Locations Only Counter"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "implausible-ped-lrr",
            "applyImplausiblePedCheckLRR",
            Expression::all(vec![
                fld("isObjectPedestrian"),
                fld("stateY").abs().gt(num(5.0)),
                fld("updatesSinceLastSensor").lt(num(3.0)),
                fld("numMicroDopplerCycles").lt(num(1.0)),
                fld("rcs").gt(num(15.0)),
                fld("expectedVrHighEnough").not(),
                fld("stationaryLocationsOnlyCounter").gt(num(10.0)),
            ]),
        )
        .with_description("LRR-specific implausible pedestrian checks")
        .with_fields(vec![
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::boolean("isObjectPedestrian", "Is Object Pedestrian?"),
            FieldSpec::number("numMicroDopplerCycles", "Number of Micro Doppler Cycles"),
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::boolean("expectedVrHighEnough", "Expected VR High Enough?"),
            FieldSpec::number("stationaryLocationsOnlyCounter", "Stationary Locations Only Counter"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "implausible-car-close-range",
            "applyImplausibleCarAtCloseRangeCheck",
            Expression::all(vec![
                fld("isObjectCar"),
                fld("stateX").lt(num(15.0)),
                fld("dimensionLength").gt(num(6.0)),
                fld("updatesSinceLastSensor").lt(num(3.0)),
                fld("isOnlyFrontCenterRadar"),
            ]),
        )
        .with_description("Checks long cars at close range updated only by front center radar")
        .with_fields(vec![
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("dimensionLength", "Dimension Length"),
            FieldSpec::boolean("isObjectCar", "Is Object Car?"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::boolean("isOnlyFrontCenterRadar", "Is Only Front Center Radar?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "elevated-object",
            "applyElevatedObjectCheck",
            Expression::all(vec![
                fld("elevationIsValid"),
                fld("elevation").gt(num(25.0)),
                fld("rcs").lt(num(-5.0)),
                fld("updatesSinceLastSensor").lt(num(5.0)),
                fld("numCyclesExisting").gt(num(8.0)),
                fld("stationaryLocationsOnlyCounter").gt(num(5.0)),
                fld("stateX").lt(num(80.0)),
            ]),
        )
        .with_description("Checks elevated objects with unreliable characteristics")
        .with_fields(vec![
            FieldSpec::number("rcs", "RCS (Radar Cross Section)"),
            FieldSpec::boolean("elevationIsValid", "Elevation Is Valid?"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("stationaryLocationsOnlyCounter", "Stationary Locations Only Counter"),
            FieldSpec::number("stateX", "State X Position"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "bridge",
            "applyBridgeCheck",
            Expression::all(vec![
                fld("videoBasedInnovation").gt(num(3.0)),
                fld("elevationIsValid"),
                fld("elevation").gt(num(30.0)),
                fld("stationaryLocationsOnlyCounter").gt(num(10.0)),
                fld("updatesSinceLastSensor").lt(num(4.0)),
            ]),
        )
        .with_description("Checks objects with bridge-like characteristics")
        .with_fields(vec![
            FieldSpec::number("videoBasedInnovation", "Video Based Innovation"),
            FieldSpec::boolean("elevationIsValid", "Elevation Is Valid?"),
            FieldSpec::number("elevation", "Elevation (degrees)"),
            FieldSpec::number("stationaryLocationsOnlyCounter", "Stationary Locations Only Counter"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "corner-radar-stationary-first-time",
            "applyCornerRadarAssoWithStationaryLocationsForTheFirstTime",
            Expression::all(vec![
                fld("isObjectVru"),
                fld("numCyclesExisting").lt(num(8.0)),
                fld("totalNumSensorUpdates").lt(num(5.0)),
                fld("stationaryLocationsOnlyCounter").gt(num(2.0)),
                fld("isCornerRadarDetected"),
            ]),
        )
        .with_description("Checks young VRU first detected by corner radar with stationary locations")
        .with_fields(vec![
            FieldSpec::boolean("isObjectVru", "Is Object VRU?"),
            FieldSpec::number("numCyclesExisting", "Number of Cycles Existing"),
            FieldSpec::number("totalNumSensorUpdates", "Total Number of Sensor Updates"),
            FieldSpec::number("stationaryLocationsOnlyCounter", "Stationary Locations Only Counter"),
            FieldSpec::boolean("isCornerRadarDetected", "Is Corner Radar Detected?"),
        ])
        .with_action("Disqualifies for AEB"),
        RuleDefinition::new(
            "inconsistent-alpha",
            "applyInconsistentAlphaCheck",
            Expression::all(vec![
                fld("radarRawAlphaInnovation")
                    .sub(fld("videoRawAlphaInnovation"))
                    .abs()
                    .gt(num(0.2)),
                Expression::magnitude(fld("stateX"), fld("stateY")).lt(num(60.0)),
                fld("updatesSinceLastSensor").lt(num(5.0)),
            ]),
        )
        .with_description("Checks objects with inconsistent radar and video alpha innovations")
        .with_fields(vec![
            FieldSpec::number("radarRawAlphaInnovation", "Radar Raw Alpha Innovation"),
            FieldSpec::number("videoRawAlphaInnovation", "Video Raw Alpha Innovation"),
            FieldSpec::number("stateX", "State X Position"),
            FieldSpec::number("stateY", "State Y Position"),
            FieldSpec::number("updatesSinceLastSensor", "Updates Since Last Sensor"),
        ])
        .with_action("Disqualifies for AEB"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use plausi_core::FieldKind;
    use std::collections::HashSet;

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.len(), 40);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let catalog = Catalog::standard().unwrap();
        let ids: HashSet<&str> = catalog.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_declaration_order_is_stable() {
        let catalog = Catalog::standard().unwrap();
        assert_eq!(catalog.all()[0].id, "suppressed-until-next-video-update");
        assert_eq!(catalog.all()[2].id, "moving-towards-ego-lane");
        assert_eq!(catalog.all()[6].id, "fast-wnj-measurement-ratio");
        assert_eq!(catalog.all()[39].id, "inconsistent-alpha");
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::standard().unwrap();
        let rule = catalog.get("probable-video-ghost").unwrap();
        assert_eq!(rule.name, "isDepObjProbablyVideoGhost");
        assert_eq!(rule.fields.len(), 5);

        let err = catalog.get("not-a-rule").unwrap_err();
        assert_eq!(err, EngineError::NotFound("not-a-rule".to_string()));
    }

    #[test]
    fn test_every_predicate_field_is_declared() {
        // Same invariant the constructor enforces, asserted directly so a
        // regression names the offending rule and field.
        for rule in Catalog::standard().unwrap().all() {
            let declared: HashSet<&str> = rule.fields.iter().map(|f| f.name.as_str()).collect();
            for field in rule.predicate.referenced_fields() {
                assert!(
                    declared.contains(field.as_str()),
                    "rule '{}' reads undeclared field '{}'",
                    rule.id,
                    field
                );
            }
        }
    }

    #[test]
    fn test_threshold_fields_have_defaults() {
        let catalog = Catalog::standard().unwrap();

        let rule = catalog.get("fast-wnj-measurement-ratio").unwrap();
        assert_eq!(rule.field("velocityThreshold").unwrap().default, Some(5.0));
        assert_eq!(rule.field("ratioThreshold").unwrap().default, Some(0.3));

        let rule = catalog.get("orientation-consistency").unwrap();
        assert_eq!(rule.field("angleDiffThreshold").unwrap().default, Some(90.0));

        let rule = catalog
            .get("radar-only-longitudinal-measurement-ratio")
            .unwrap();
        assert_eq!(rule.field("ratioThreshold").unwrap().default, Some(0.4));
    }

    #[test]
    fn test_choice_fields_declare_filter_types() {
        let catalog = Catalog::standard().unwrap();
        let rule = catalog.get("non-plausible-location").unwrap();
        match &rule.field("filterType").unwrap().kind {
            FieldKind::Choice { options } => assert_eq!(options, &["CA", "CV", "LA"]),
            other => panic!("Expected Choice kind, got {other:?}"),
        }
    }

    #[test]
    fn test_undeclared_field_rejected_at_construction() {
        let bad = RuleDefinition::new("bad", "badCheck", fld("ghostField").gt(num(1.0)))
            .with_fields(vec![FieldSpec::number("other", "Other")]);

        let err = Catalog::from_rules(vec![bad]).unwrap_err();
        assert_eq!(
            err,
            EngineError::UndeclaredField {
                rule: "bad".to_string(),
                field: "ghostField".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let a = RuleDefinition::new("dup", "a", fld("x"))
            .with_fields(vec![FieldSpec::boolean("x", "X?")]);
        let b = RuleDefinition::new("dup", "b", fld("x"))
            .with_fields(vec![FieldSpec::boolean("x", "X?")]);
        assert!(Catalog::from_rules(vec![a, b]).is_err());
    }
}
