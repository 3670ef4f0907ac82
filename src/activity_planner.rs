//! Activity Planner: pickup and drop-off activities, each one hour
//! on-duty-not-driving, with pre-activity rests inserted when needed.

use tracing::{debug, info};

use crate::clock::DriverClock;
use crate::error::PlannerError;
use crate::rules::RuleSet;
use crate::types::{DutyStatus, Location, Segment, SegmentType};

const EPSILON_HOURS: f64 = 1e-9;

/// Emit the one-hour pickup activity, inserting a daily rest or cycle
/// restart beforehand if the activity would otherwise exceed the on-duty
/// window or the 8-day cycle.
pub fn plan_pickup_activity(
    rules: &RuleSet,
    clock: &mut DriverClock,
    location: &Location,
) -> Result<Vec<Segment>, PlannerError> {
    plan_activity(
        rules,
        clock,
        location,
        rules.pickup_activity_hours,
        SegmentType::Pickup,
    )
}

/// Emit the one-hour drop-off activity, under the same pre-rest rule as
/// `plan_pickup_activity`.
pub fn plan_drop_off_activity(
    rules: &RuleSet,
    clock: &mut DriverClock,
    location: &Location,
) -> Result<Vec<Segment>, PlannerError> {
    plan_activity(
        rules,
        clock,
        location,
        rules.drop_off_activity_hours,
        SegmentType::DropOff,
    )
}

fn plan_activity(
    rules: &RuleSet,
    clock: &mut DriverClock,
    location: &Location,
    activity_hours: f64,
    segment_type: SegmentType,
) -> Result<Vec<Segment>, PlannerError> {
    info!("activity start: {:?} duration={:.2}h", segment_type, activity_hours);
    let mut segments = Vec::new();

    // Same hierarchy as the segment planner: cycle before daily. Bounded to
    // two passes since a cycle restart alone resolves both a cycle and a
    // window shortfall.
    for _ in 0..2 {
        let would_exceed_cycle = clock.remaining_cycle(rules) + EPSILON_HOURS < activity_hours;
        let would_exceed_window = clock.remaining_window(rules) + EPSILON_HOURS < activity_hours;

        if !would_exceed_cycle && !would_exceed_window {
            break;
        }

        let start_time = clock.current_time;
        let position = location.clone();

        if would_exceed_cycle {
            clock.apply_cycle_restart(rules)?;
            debug!("cycle_restart emitted before activity at {}", start_time);
            segments.push(Segment {
                segment_type: SegmentType::CycleRestart,
                start_time,
                end_time: clock.current_time,
                duration_hours: rules.restart_hours,
                distance_miles: 0.0,
                status: DutyStatus::SleeperBerth,
                start_coordinates: position.clone(),
                end_coordinates: position,
                location_label: None,
            });
        } else {
            clock.apply_daily_rest(rules)?;
            debug!("daily_rest emitted before activity at {}", start_time);
            segments.push(Segment {
                segment_type: SegmentType::DailyRest,
                start_time,
                end_time: clock.current_time,
                duration_hours: rules.min_rest_hours,
                distance_miles: 0.0,
                status: DutyStatus::SleeperBerth,
                start_coordinates: position.clone(),
                end_coordinates: position,
                location_label: None,
            });
        }
    }

    if clock.remaining_window(rules) + EPSILON_HOURS < activity_hours
        || clock.remaining_cycle(rules) + EPSILON_HOURS < activity_hours
    {
        return Err(PlannerError::PlanInfeasible(
            "activity does not fit even after a cycle restart and a daily rest".to_string(),
        ));
    }

    let start_time = clock.current_time;
    clock.apply_on_duty_not_driving(rules, activity_hours)?;

    segments.push(Segment {
        segment_type,
        start_time,
        end_time: clock.current_time,
        duration_hours: activity_hours,
        distance_miles: 0.0,
        status: DutyStatus::OnDutyNotDriving,
        start_coordinates: location.clone(),
        end_coordinates: location.clone(),
        location_label: location.label.clone(),
    });

    info!("activity end: {:?} {} segments emitted", segment_type, segments.len());

    Ok(segments)
}
