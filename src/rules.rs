//! HOS Rule Table.
//!
//! Pure data keyed by rule-set tag. Exists to keep the numeric policy
//! testable in isolation from the planners that consume it.

use crate::error::PlannerError;

/// Immutable record of HOS constants for a given rule-set tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSet {
    pub max_driving_hours: f64,
    pub max_on_duty_window_hours: f64,
    pub driving_before_break_hours: f64,
    pub mandatory_break_hours: f64,
    pub max_cycle_hours: f64,
    pub min_rest_hours: f64,
    pub restart_hours: f64,
    pub fuel_interval_miles: f64,
    pub fuel_stop_hours: f64,
    pub pickup_activity_hours: f64,
    pub drop_off_activity_hours: f64,
}

const INTERSTATE: RuleSet = RuleSet {
    max_driving_hours: 11.0,
    max_on_duty_window_hours: 14.0,
    driving_before_break_hours: 8.0,
    mandatory_break_hours: 0.5,
    max_cycle_hours: 70.0,
    min_rest_hours: 10.0,
    restart_hours: 34.0,
    fuel_interval_miles: 1000.0,
    fuel_stop_hours: 0.25,
    pickup_activity_hours: 1.0,
    drop_off_activity_hours: 1.0,
};

/// Look up the `RuleSet` registered under `tag`.
///
/// Only `"INTERSTATE"` is registered today.
pub fn get(tag: &str) -> Result<RuleSet, PlannerError> {
    match tag {
        "INTERSTATE" => Ok(INTERSTATE),
        other => Err(PlannerError::UnknownRuleSet(other.to_string())),
    }
}
