//! Inbound `plan_trip` request shape (§6 of the planner API).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Location;
use crate::error::PlannerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTripRequest {
    pub current_location: Location,
    pub pickup_location: Location,
    pub drop_off_location: Location,
    pub current_cycle_used: f64,
    pub start_time: String,
    pub timezone_offset_minutes: i32,
}

impl PlanTripRequest {
    /// Validate field-level constraints that are cheap to check up front:
    /// coordinate ranges, the cycle-hours range, and that `start_time`
    /// parses as RFC 3339. Returns the parsed start time on success.
    pub fn validate(&self) -> Result<DateTime<FixedOffset>, PlannerError> {
        for (field, loc) in [
            ("current_location", &self.current_location),
            ("pickup_location", &self.pickup_location),
            ("drop_off_location", &self.drop_off_location),
        ] {
            if !loc.is_valid() {
                return Err(PlannerError::InvalidRequest {
                    field: field.to_string(),
                    message: format!(
                        "coordinates ({}, {}) are out of range",
                        loc.latitude, loc.longitude
                    ),
                });
            }
        }

        if !(0.0..=70.0).contains(&self.current_cycle_used) {
            return Err(PlannerError::InvalidRequest {
                field: "current_cycle_used".to_string(),
                message: format!(
                    "{} is outside the allowed range [0, 70]",
                    self.current_cycle_used
                ),
            });
        }

        if !(-1440..=1440).contains(&self.timezone_offset_minutes) {
            return Err(PlannerError::InvalidRequest {
                field: "timezone_offset_minutes".to_string(),
                message: format!("{} is not a valid UTC offset", self.timezone_offset_minutes),
            });
        }

        let parsed = DateTime::parse_from_rfc3339(&self.start_time).map_err(|e| {
            PlannerError::InvalidRequest {
                field: "start_time".to_string(),
                message: format!("not a valid RFC 3339 timestamp: {e}"),
            }
        })?;

        let offset = FixedOffset::east_opt(self.timezone_offset_minutes * 60).ok_or_else(|| {
            PlannerError::InvalidRequest {
                field: "timezone_offset_minutes".to_string(),
                message: format!("{} is not a valid UTC offset", self.timezone_offset_minutes),
            }
        })?;

        Ok(parsed.with_timezone(&offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> PlanTripRequest {
        PlanTripRequest {
            current_location: Location::new(40.0, -74.0),
            pickup_location: Location::new(41.0, -75.0),
            drop_off_location: Location::new(42.0, -76.0),
            current_cycle_used: 0.0,
            start_time: "2025-01-01T08:00:00Z".to_string(),
            timezone_offset_minutes: 0,
        }
    }

    #[test]
    fn valid_request_parses_start_time() {
        let req = base_request();
        let parsed = req.validate().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-01T08:00:00+00:00");
    }

    #[test]
    fn cycle_used_out_of_range_rejected() {
        let mut req = base_request();
        req.current_cycle_used = 71.0;
        let err = req.validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest { field, .. } if field == "current_cycle_used"));
    }

    #[test]
    fn malformed_start_time_rejected() {
        let mut req = base_request();
        req.start_time = "not-a-timestamp".to_string();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest { field, .. } if field == "start_time"));
    }

    #[test]
    fn malformed_coordinates_rejected() {
        let mut req = base_request();
        req.pickup_location.latitude = 200.0;
        let err = req.validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidRequest { field, .. } if field == "pickup_location"));
    }

    #[test]
    fn timezone_offset_applied() {
        let mut req = base_request();
        req.timezone_offset_minutes = -300;
        let parsed = req.validate().unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-01-01T03:00:00-05:00");
    }
}
