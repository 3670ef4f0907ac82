//! Trip Summarizer: a pure fold over the final segment list.

use crate::error::PlannerError;
use crate::types::{DutyStatus, Location, RoutePlan, Segment};

/// Fold `segments` into the totals that make up a `RoutePlan`. `segments`
/// must be non-empty and in chronological order; `leg1_geometry` and
/// `leg2_geometry` are concatenated (duplicate junction point removed) to
/// form `route_geometry`.
pub fn summarize(
    segments: Vec<Segment>,
    leg1_geometry: &[Location],
    leg2_geometry: &[Location],
) -> Result<RoutePlan, PlannerError> {
    let first = segments
        .first()
        .ok_or_else(|| PlannerError::PlanInfeasible("trip produced no segments".to_string()))?;
    let last = segments.last().expect("non-empty, checked above");

    let start_time = first.start_time;
    let end_time = last.end_time;
    let total_duration_hours =
        (end_time - start_time).num_microseconds().unwrap_or(0) as f64
            / crate::clock::MICROS_PER_HOUR as f64;

    let total_distance_miles: f64 = segments.iter().map(|s| s.distance_miles).sum();

    let driving_time: f64 = segments
        .iter()
        .filter(|s| s.status == DutyStatus::OnDutyDriving)
        .map(|s| s.duration_hours)
        .sum();

    let resting_time: f64 = segments
        .iter()
        .filter(|s| matches!(s.status, DutyStatus::OffDuty | DutyStatus::SleeperBerth))
        .map(|s| s.duration_hours)
        .sum();

    let mut route_geometry: Vec<Location> = leg1_geometry.to_vec();
    for point in leg2_geometry {
        if route_geometry.last() != Some(point) {
            route_geometry.push(point.clone());
        }
    }

    Ok(RoutePlan {
        segments,
        total_distance_miles,
        total_duration_hours,
        start_time,
        end_time,
        route_geometry,
        driving_time,
        resting_time,
    })
}
