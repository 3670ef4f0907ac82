//! Trip Coordinator: orchestrates both legs, fetching route geometry
//! concurrently and composing the Segment and Activity Planners against a
//! single `DriverClock`.

use tracing::info;

use crate::activity_planner::{plan_drop_off_activity, plan_pickup_activity};
use crate::clock::DriverClock;
use crate::error::PlannerError;
use crate::rules::{self, RuleSet};
use crate::segment_planner::plan_leg;
use crate::services::routing::RoutingOracle;
use crate::summarizer;
use crate::types::{PlanTripRequest, RoutePlan, SegmentType};

/// Orchestrates one `plan_trip` request against a given routing oracle and
/// rule-set tag.
pub struct TripCoordinator<'a, O: RoutingOracle> {
    oracle: &'a O,
    rule_set_tag: &'a str,
}

impl<'a, O: RoutingOracle> TripCoordinator<'a, O> {
    pub fn new(oracle: &'a O, rule_set_tag: &'a str) -> Self {
        Self { oracle, rule_set_tag }
    }

    /// Plan a complete trip: current location -> pickup -> drop-off.
    pub async fn plan_trip(&self, request: &PlanTripRequest) -> Result<RoutePlan, PlannerError> {
        let rules: RuleSet = rules::get(self.rule_set_tag)?;
        let start_time = request.validate()?;

        info!(
            "planning trip: current=({}, {}) pickup=({}, {}) drop_off=({}, {}) cycle_used={}",
            request.current_location.latitude,
            request.current_location.longitude,
            request.pickup_location.latitude,
            request.pickup_location.longitude,
            request.drop_off_location.latitude,
            request.drop_off_location.longitude,
            request.current_cycle_used,
        );

        let (leg1, leg2) = tokio::try_join!(
            self.oracle
                .fetch_route(&request.current_location, &request.pickup_location),
            self.oracle
                .fetch_route(&request.pickup_location, &request.drop_off_location),
        )?;

        let mut clock = DriverClock::new(request.current_cycle_used, start_time);
        let mut segments = Vec::new();

        info!("leg 1 (current -> pickup): dispatching to segment planner");
        segments.extend(plan_leg(&rules, &mut clock, &leg1, SegmentType::DriveToPickup)?);
        info!("leg 1 (current -> pickup): planned, {} segments so far", segments.len());

        segments.extend(plan_pickup_activity(&rules, &mut clock, &request.pickup_location)?);

        info!("leg 2 (pickup -> drop_off): dispatching to segment planner");
        segments.extend(plan_leg(&rules, &mut clock, &leg2, SegmentType::DriveToDropOff)?);
        info!("leg 2 (pickup -> drop_off): planned, {} segments so far", segments.len());

        segments.extend(plan_drop_off_activity(
            &rules,
            &mut clock,
            &request.drop_off_location,
        )?);

        info!(
            "trip planned: {} segments, {:.2}mi total",
            segments.len(),
            leg1.distance_miles + leg2.distance_miles
        );

        summarizer::summarize(segments, &leg1.geometry, &leg2.geometry)
    }
}
