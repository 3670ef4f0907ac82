//! Route geometry and distance/duration returned by the routing oracle.

use serde::{Deserialize, Serialize};

use super::Location;

/// Immutable triple produced by the Routing Oracle Client and consumed
/// read-only by the Segment Planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteInformation {
    pub distance_miles: f64,
    pub duration_hours: f64,
    pub geometry: Vec<Location>,
}

impl RouteInformation {
    /// The degenerate route for a zero-distance, zero-duration leg: a
    /// single-point geometry at `origin`, used when origin and destination
    /// coincide.
    pub fn degenerate(origin: Location) -> Self {
        Self {
            distance_miles: 0.0,
            duration_hours: 0.0,
            geometry: vec![origin],
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.distance_miles == 0.0 && self.duration_hours == 0.0
    }
}
