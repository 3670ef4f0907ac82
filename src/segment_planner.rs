//! Segment Planner: fractures one free-flowing driving leg into an ordered
//! list of segments that obey every HOS invariant.

use tracing::{debug, info};

use crate::clock::{hours_to_micros, micros_to_hours, DriverClock};
use crate::error::PlannerError;
use crate::rules::RuleSet;
use crate::types::{DutyStatus, Location, RouteInformation, Segment, SegmentType};

/// Below this many hours a constraint is treated as exhausted. One
/// microsecond's worth of hours, comfortably beneath any meaningful HOS
/// quantity but large enough to absorb floating rounding in the `min()`
/// chain below.
const EPSILON_HOURS: f64 = 1e-9;

/// Safety bound on loop iterations per leg, guarding against an algorithm
/// bug that would otherwise spin forever instead of making progress.
const MAX_ITERATIONS: usize = 10_000;

/// Pick the geometry point at `fraction` (0.0..=1.0) of the way along
/// `geometry` by nearest-index lookup.
fn point_at_fraction(geometry: &[Location], fraction: f64) -> Location {
    if geometry.is_empty() {
        // Should never happen for a non-degenerate leg; callers guard this.
        return Location::new(0.0, 0.0);
    }
    let last_index = geometry.len() - 1;
    let index = (fraction.clamp(0.0, 1.0) * last_index as f64).round() as usize;
    geometry[index.min(last_index)].clone()
}

/// Plan the sub-segments covering one driving leg, mutating `clock` as it
/// goes. `segment_type` must be `DriveToPickup` or `DriveToDropOff`; the
/// planner reuses it for every driving sub-segment of the leg.
pub fn plan_leg(
    rules: &RuleSet,
    clock: &mut DriverClock,
    leg: &RouteInformation,
    segment_type: SegmentType,
) -> Result<Vec<Segment>, PlannerError> {
    info!(
        "leg start: {:?} distance={:.2}mi duration={:.2}h",
        segment_type, leg.distance_miles, leg.duration_hours
    );

    if leg.distance_miles == 0.0 && leg.duration_hours == 0.0 {
        info!("leg end: {:?} degenerate, no segments emitted", segment_type);
        return Ok(Vec::new());
    }

    let total_micros = hours_to_micros(leg.duration_hours);
    let average_speed = if leg.duration_hours > 0.0 {
        leg.distance_miles / leg.duration_hours
    } else {
        0.0
    };

    let mut segments = Vec::new();
    let mut elapsed_micros: i64 = 0;
    let mut distance_consumed = 0.0;
    let mut position = point_at_fraction(&leg.geometry, 0.0);

    for _ in 0..MAX_ITERATIONS {
        if elapsed_micros >= total_micros {
            break;
        }

        let remaining_leg_hours = micros_to_hours(total_micros - elapsed_micros);
        let remaining_driving = clock.remaining_driving(rules);
        let remaining_window = clock.remaining_window(rules);
        let remaining_break = clock.remaining_before_break(rules);
        let remaining_cycle = clock.remaining_cycle(rules);
        let hours_to_fuel = if average_speed > 0.0 {
            ((rules.fuel_interval_miles - clock.miles_since_last_fuel) / average_speed).max(0.0)
        } else {
            f64::INFINITY
        };

        let d = remaining_driving
            .min(remaining_window)
            .min(remaining_break)
            .min(remaining_cycle)
            .min(remaining_leg_hours)
            .min(hours_to_fuel);

        if d <= EPSILON_HOURS {
            let start_time = clock.current_time;
            let (rest_type, rest_status) = if remaining_cycle <= EPSILON_HOURS {
                clock.apply_cycle_restart(rules)?;
                debug!("cycle_restart emitted at {}", start_time);
                (SegmentType::CycleRestart, DutyStatus::SleeperBerth)
            } else if remaining_window <= EPSILON_HOURS || remaining_driving <= EPSILON_HOURS {
                clock.apply_daily_rest(rules)?;
                debug!("daily_rest emitted at {}", start_time);
                (SegmentType::DailyRest, DutyStatus::SleeperBerth)
            } else if remaining_break <= EPSILON_HOURS {
                clock.apply_mandatory_break(rules)?;
                debug!("mandatory_driving_break emitted at {}", start_time);
                (SegmentType::MandatoryDrivingBreak, DutyStatus::OffDuty)
            } else if hours_to_fuel <= EPSILON_HOURS {
                clock.apply_fueling(rules)?;
                debug!("fueling emitted at {}", start_time);
                (SegmentType::Fueling, DutyStatus::OnDutyNotDriving)
            } else {
                return Err(PlannerError::PlanInfeasible(
                    "no forward progress possible: every limit reports remaining time but the maximum contiguous driving interval is zero".to_string(),
                ));
            };

            segments.push(Segment {
                segment_type: rest_type,
                start_time,
                end_time: clock.current_time,
                duration_hours: (clock.current_time - start_time).num_microseconds().unwrap_or(0) as f64
                    / crate::clock::MICROS_PER_HOUR as f64,
                distance_miles: 0.0,
                status: rest_status,
                start_coordinates: position.clone(),
                end_coordinates: position.clone(),
                location_label: None,
            });
            continue;
        }

        let mut d_micros = hours_to_micros(d);
        if d_micros <= 0 {
            d_micros = 1;
        }
        if elapsed_micros + d_micros > total_micros {
            d_micros = total_micros - elapsed_micros;
        }
        let d_hours = micros_to_hours(d_micros);
        let is_final_chunk = elapsed_micros + d_micros >= total_micros;

        let segment_distance = if is_final_chunk {
            (leg.distance_miles - distance_consumed).max(0.0)
        } else {
            d_hours * average_speed
        };

        let start_time = clock.current_time;
        let start_position = position.clone();

        clock.apply_drive(rules, d_hours, segment_distance)?;
        elapsed_micros += d_micros;
        distance_consumed += segment_distance;

        position = if is_final_chunk {
            leg.geometry.last().cloned().unwrap_or(start_position.clone())
        } else {
            point_at_fraction(&leg.geometry, elapsed_micros as f64 / total_micros as f64)
        };

        segments.push(Segment {
            segment_type,
            start_time,
            end_time: clock.current_time,
            duration_hours: d_hours,
            distance_miles: segment_distance,
            status: DutyStatus::OnDutyDriving,
            start_coordinates: start_position,
            end_coordinates: position.clone(),
            location_label: None,
        });
    }

    if elapsed_micros < total_micros {
        return Err(PlannerError::PlanInfeasible(
            "segment planner exceeded its iteration bound without completing the leg".to_string(),
        ));
    }

    info!(
        "leg end: {:?} {} segments emitted, {:.2}mi covered",
        segment_type,
        segments.len(),
        distance_consumed
    );

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::DriverClock;
    use chrono::{FixedOffset, TimeZone};

    fn start_time() -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
            .unwrap()
    }

    fn rules() -> RuleSet {
        crate::rules::get("INTERSTATE").unwrap()
    }

    fn straight_leg(distance_miles: f64, duration_hours: f64) -> RouteInformation {
        RouteInformation {
            distance_miles,
            duration_hours,
            geometry: vec![Location::new(40.0, -74.0), Location::new(41.0, -73.0)],
        }
    }

    #[test]
    fn zero_leg_emits_nothing() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(0.0, 0.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();
        assert!(segments.is_empty());
        assert_eq!(clock.driving_hours_used_in_shift(), 0.0);
    }

    #[test]
    fn short_leg_is_a_single_drive_segment() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(100.0, 2.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].segment_type, SegmentType::DriveToPickup);
        assert!((segments[0].duration_hours - 2.0).abs() < 1e-9);
        assert!((segments[0].distance_miles - 100.0).abs() < 1e-9);
        assert_eq!(segments[0].end_coordinates, *leg.geometry.last().unwrap());
    }

    #[test]
    fn eight_hour_break_inserted_mid_leg() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(500.0, 9.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        let break_count = segments
            .iter()
            .filter(|s| s.segment_type == SegmentType::MandatoryDrivingBreak)
            .count();
        assert_eq!(break_count, 1);

        let total_driving: f64 = segments
            .iter()
            .filter(|s| s.status == DutyStatus::OnDutyDriving)
            .map(|s| s.duration_hours)
            .sum();
        assert!((total_driving - 9.0).abs() < 1e-6);

        // final drive segment ends exactly at leg end
        let last_drive = segments
            .iter()
            .rev()
            .find(|s| s.status == DutyStatus::OnDutyDriving)
            .unwrap();
        assert_eq!(last_drive.end_coordinates, *leg.geometry.last().unwrap());
    }

    #[test]
    fn daily_rest_inserted_after_eleven_hours_driving() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(700.0, 13.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        assert!(segments
            .iter()
            .any(|s| s.segment_type == SegmentType::DailyRest));

        let total_distance: f64 = segments.iter().map(|s| s.distance_miles).sum();
        assert!((total_distance - 700.0).abs() < 1e-6);
    }

    #[test]
    fn cycle_restart_triggers_near_cap() {
        let rules = rules();
        let mut clock = DriverClock::new(69.0, start_time());
        let leg = straight_leg(100.0, 2.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        assert!(segments
            .iter()
            .any(|s| s.segment_type == SegmentType::CycleRestart));
        assert!(clock.cycle_hours_used() < rules.max_cycle_hours);
    }

    #[test]
    fn fuel_stop_inserted_past_a_thousand_miles() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(1200.0, 20.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        assert!(segments
            .iter()
            .any(|s| s.segment_type == SegmentType::Fueling));

        let total_distance: f64 = segments.iter().map(|s| s.distance_miles).sum();
        assert!((total_distance - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn segments_are_chronologically_contiguous() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start_time());
        let leg = straight_leg(1200.0, 20.0);
        let segments = plan_leg(&rules, &mut clock, &leg, SegmentType::DriveToPickup).unwrap();

        for pair in segments.windows(2) {
            assert_eq!(pair[0].end_time, pair[1].start_time);
        }
    }
}
