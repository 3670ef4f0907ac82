//! Segment: a single contiguous duty-state interval in a route plan.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Location;

/// The kind of activity a segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    DriveToPickup,
    DriveToDropOff,
    MandatoryDrivingBreak,
    DailyRest,
    CycleRestart,
    Fueling,
    Pickup,
    DropOff,
}

/// Duty state the driver is in for the duration of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyStatus {
    #[serde(rename = "On Duty (Driving)")]
    OnDutyDriving,
    #[serde(rename = "On Duty (Not Driving)")]
    OnDutyNotDriving,
    #[serde(rename = "Off Duty")]
    OffDuty,
    #[serde(rename = "Sleeper Berth")]
    SleeperBerth,
}

/// A single-duty-state interval in the final plan. Consecutive segments
/// cover the trip without gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub duration_hours: f64,
    pub distance_miles: f64,
    pub status: DutyStatus,
    pub start_coordinates: Location,
    pub end_coordinates: Location,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location_label: Option<String>,
}
