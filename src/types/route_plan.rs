//! The final, fully time-stamped trip plan.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Location, Segment};

/// Produced exactly once per request by the Trip Coordinator and never
/// mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub segments: Vec<Segment>,
    pub total_distance_miles: f64,
    pub total_duration_hours: f64,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub route_geometry: Vec<Location>,
    pub driving_time: f64,
    pub resting_time: f64,
}
