//! Routing Oracle Client.
//!
//! Fetches `(distance_miles, duration_hours, polyline)` for an ordered pair
//! of Locations from an OSRM-style external routing service. Degenerate
//! (same-coordinate) requests are handled by every implementation without
//! touching the network.

mod osrm;

pub use osrm::{OsrmClient, OsrmConfig};

use async_trait::async_trait;

use crate::error::PlannerError;
use crate::types::{Location, RouteInformation};

/// Routing Oracle Client contract. Implementations must be safely callable
/// concurrently — the Trip Coordinator fetches both legs of a trip at once.
#[async_trait]
pub trait RoutingOracle: Send + Sync {
    async fn fetch_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInformation, PlannerError>;

    /// Name for logging, matching the oracle's transport.
    fn name(&self) -> &str;
}

/// If `origin` and `destination` are the same coordinates, the degenerate
/// route is returned without calling the network. `None` otherwise, meaning
/// the caller should proceed with a real fetch.
pub(crate) fn degenerate_route(origin: &Location, destination: &Location) -> Option<RouteInformation> {
    (origin == destination).then(|| RouteInformation::degenerate(origin.clone()))
}

/// Deterministic stub used by the coordinator's own tests and by downstream
/// property tests that need reproducible oracle responses (property 9:
/// identical inputs plus a deterministic oracle stub produce identical
/// plans). Straight-line geometry between origin and destination at a fixed
/// average speed — no network, no randomness.
pub struct StubRoutingOracle {
    average_speed_mph: f64,
}

impl Default for StubRoutingOracle {
    fn default() -> Self {
        Self {
            average_speed_mph: 55.0,
        }
    }
}

impl StubRoutingOracle {
    pub fn new(average_speed_mph: f64) -> Self {
        Self { average_speed_mph }
    }

    /// Stub that returns a route of exactly `distance_miles`/`duration_hours`
    /// regardless of the coordinates passed in, for tests that want to pin
    /// down an exact leg shape (S1-S6 style scenarios).
    pub fn fixed(distance_miles: f64, duration_hours: f64) -> FixedRoutingOracle {
        FixedRoutingOracle {
            distance_miles,
            duration_hours,
        }
    }
}

#[async_trait]
impl RoutingOracle for StubRoutingOracle {
    async fn fetch_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInformation, PlannerError> {
        if let Some(degenerate) = degenerate_route(origin, destination) {
            return Ok(degenerate);
        }

        let distance_miles = haversine_miles(origin, destination);
        let duration_hours = distance_miles / self.average_speed_mph;

        Ok(RouteInformation {
            distance_miles,
            duration_hours,
            geometry: vec![origin.clone(), destination.clone()],
        })
    }

    fn name(&self) -> &str {
        "StubRoutingOracle"
    }
}

/// A stub that always returns the same `(distance, duration)`, ignoring the
/// requested coordinates (except to honor the degenerate-input contract).
/// Used by end-to-end scenario tests that pin an exact leg shape (spec §8,
/// S2-S6).
pub struct FixedRoutingOracle {
    distance_miles: f64,
    duration_hours: f64,
}

#[async_trait]
impl RoutingOracle for FixedRoutingOracle {
    async fn fetch_route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<RouteInformation, PlannerError> {
        if let Some(degenerate) = degenerate_route(origin, destination) {
            return Ok(degenerate);
        }

        Ok(RouteInformation {
            distance_miles: self.distance_miles,
            duration_hours: self.duration_hours,
            geometry: vec![origin.clone(), destination.clone()],
        })
    }

    fn name(&self) -> &str {
        "FixedRoutingOracle"
    }
}

fn haversine_miles(from: &Location, to: &Location) -> f64 {
    const EARTH_RADIUS_MILES: f64 = 3958.8;

    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}
