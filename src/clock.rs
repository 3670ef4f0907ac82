//! Driver Clock: the HOS state machine.
//!
//! Tracks remaining driving time, on-duty window, 30-minute-break
//! eligibility, and the rolling 8-day cumulative duty total. Mutated
//! exclusively by the Segment and Activity Planners through the methods
//! below; no other code writes these fields directly.
//!
//! Internally all durations are tracked in microseconds (`i64`) and only
//! converted to `f64` hours at the boundary, so repeated additions across a
//! long trip never accumulate the floating-point drift that hour-based
//! arithmetic would.

use chrono::{DateTime, FixedOffset};

use crate::error::PlannerError;
use crate::rules::RuleSet;

/// Microseconds per hour, the internal time unit of the clock.
pub const MICROS_PER_HOUR: i64 = 3_600_000_000;

pub fn hours_to_micros(hours: f64) -> i64 {
    (hours * MICROS_PER_HOUR as f64).round() as i64
}

pub fn micros_to_hours(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_HOUR as f64
}

/// The duty state a driver is in at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyState {
    Driving,
    OnDutyNotDriving,
    OffDuty,
    Sleeper,
}

/// Mutable HOS state threaded through one trip's planning.
#[derive(Debug, Clone)]
pub struct DriverClock {
    driving_used_micros: i64,
    on_duty_used_micros: i64,
    driving_since_break_micros: i64,
    cycle_used_micros: i64,
    pub miles_since_last_fuel: f64,
    pub current_time: DateTime<FixedOffset>,
    pub duty_state: DutyState,
}

impl DriverClock {
    /// Create a fresh clock for one trip request. `cycle_hours_used` seeds
    /// the rolling 8-day total; every other counter starts at zero.
    pub fn new(cycle_hours_used: f64, start_time: DateTime<FixedOffset>) -> Self {
        Self {
            driving_used_micros: 0,
            on_duty_used_micros: 0,
            driving_since_break_micros: 0,
            cycle_used_micros: hours_to_micros(cycle_hours_used),
            miles_since_last_fuel: 0.0,
            current_time: start_time,
            duty_state: DutyState::OffDuty,
        }
    }

    pub fn driving_hours_used_in_shift(&self) -> f64 {
        micros_to_hours(self.driving_used_micros)
    }

    pub fn on_duty_hours_used_in_shift(&self) -> f64 {
        micros_to_hours(self.on_duty_used_micros)
    }

    pub fn driving_since_last_break_hours(&self) -> f64 {
        micros_to_hours(self.driving_since_break_micros)
    }

    pub fn cycle_hours_used(&self) -> f64 {
        micros_to_hours(self.cycle_used_micros)
    }

    pub fn remaining_driving(&self, rules: &RuleSet) -> f64 {
        (rules.max_driving_hours - self.driving_hours_used_in_shift()).max(0.0)
    }

    pub fn remaining_window(&self, rules: &RuleSet) -> f64 {
        (rules.max_on_duty_window_hours - self.on_duty_hours_used_in_shift()).max(0.0)
    }

    pub fn remaining_before_break(&self, rules: &RuleSet) -> f64 {
        (rules.driving_before_break_hours - self.driving_since_last_break_hours()).max(0.0)
    }

    pub fn remaining_cycle(&self, rules: &RuleSet) -> f64 {
        (rules.max_cycle_hours - self.cycle_hours_used()).max(0.0)
    }

    fn check_invariants(&self, rules: &RuleSet) -> Result<(), PlannerError> {
        let eps = 1e-6;
        if self.driving_used_micros < 0
            || self.driving_hours_used_in_shift() > rules.max_driving_hours + eps
        {
            return Err(PlannerError::PlanInfeasible(format!(
                "driving_hours_used_in_shift {} out of bounds",
                self.driving_hours_used_in_shift()
            )));
        }
        if self.on_duty_used_micros < 0
            || self.on_duty_hours_used_in_shift() > rules.max_on_duty_window_hours + eps
        {
            return Err(PlannerError::PlanInfeasible(format!(
                "on_duty_hours_used_in_shift {} out of bounds",
                self.on_duty_hours_used_in_shift()
            )));
        }
        if self.driving_since_break_micros < 0
            || self.driving_since_last_break_hours() > rules.driving_before_break_hours + eps
        {
            return Err(PlannerError::PlanInfeasible(format!(
                "driving_since_last_break_hours {} out of bounds",
                self.driving_since_last_break_hours()
            )));
        }
        if self.cycle_used_micros < 0 || self.cycle_hours_used() > rules.max_cycle_hours + eps {
            return Err(PlannerError::PlanInfeasible(format!(
                "cycle_hours_used {} out of bounds",
                self.cycle_hours_used()
            )));
        }
        Ok(())
    }

    /// Advance the clock by `hours` of driving, covering `miles` of
    /// distance. Increments every shift/window/break/cycle counter and the
    /// fuel odometer by the same duration.
    pub fn apply_drive(
        &mut self,
        rules: &RuleSet,
        hours: f64,
        miles: f64,
    ) -> Result<(), PlannerError> {
        let delta = hours_to_micros(hours);
        self.driving_used_micros += delta;
        self.on_duty_used_micros += delta;
        self.driving_since_break_micros += delta;
        self.cycle_used_micros += delta;
        self.miles_since_last_fuel += miles;
        self.current_time += chrono::Duration::microseconds(delta);
        self.duty_state = DutyState::Driving;
        self.check_invariants(rules)
    }

    /// Advance the clock by `hours` of on-duty-not-driving activity
    /// (pickup/drop-off/fueling). Consumes window and cycle time only.
    pub fn apply_on_duty_not_driving(
        &mut self,
        rules: &RuleSet,
        hours: f64,
    ) -> Result<(), PlannerError> {
        let delta = hours_to_micros(hours);
        self.on_duty_used_micros += delta;
        self.cycle_used_micros += delta;
        self.current_time += chrono::Duration::microseconds(delta);
        self.duty_state = DutyState::OnDutyNotDriving;
        self.check_invariants(rules)
    }

    /// Consume a fueling stop: advances the clock as on-duty-not-driving
    /// time and resets the fuel odometer.
    pub fn apply_fueling(&mut self, rules: &RuleSet) -> Result<(), PlannerError> {
        self.apply_on_duty_not_driving(rules, rules.fuel_stop_hours)?;
        self.miles_since_last_fuel = 0.0;
        Ok(())
    }

    /// Consume the mandatory 30-minute driving break. Resets only
    /// `driving_since_last_break_hours`.
    pub fn apply_mandatory_break(&mut self, rules: &RuleSet) -> Result<(), PlannerError> {
        let delta = hours_to_micros(rules.mandatory_break_hours);
        self.current_time += chrono::Duration::microseconds(delta);
        self.driving_since_break_micros = 0;
        self.duty_state = DutyState::OffDuty;
        self.check_invariants(rules)
    }

    /// Consume the 10-hour daily reset. Resets shift, window, and break
    /// counters; the cycle total persists and gains no on-duty hours from
    /// the rest itself.
    pub fn apply_daily_rest(&mut self, rules: &RuleSet) -> Result<(), PlannerError> {
        let delta = hours_to_micros(rules.min_rest_hours);
        self.current_time += chrono::Duration::microseconds(delta);
        self.driving_used_micros = 0;
        self.on_duty_used_micros = 0;
        self.driving_since_break_micros = 0;
        self.duty_state = DutyState::Sleeper;
        self.check_invariants(rules)
    }

    /// Consume the 34-hour cycle restart. Resets cycle, shift, and break
    /// counters.
    pub fn apply_cycle_restart(&mut self, rules: &RuleSet) -> Result<(), PlannerError> {
        let delta = hours_to_micros(rules.restart_hours);
        self.current_time += chrono::Duration::microseconds(delta);
        self.driving_used_micros = 0;
        self.on_duty_used_micros = 0;
        self.driving_since_break_micros = 0;
        self.cycle_used_micros = 0;
        self.duty_state = DutyState::Sleeper;
        self.check_invariants(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 1, 1, 8, 0, 0)
            .unwrap()
    }

    fn rules() -> RuleSet {
        crate::rules::get("INTERSTATE").unwrap()
    }

    #[test]
    fn apply_drive_increments_all_shift_counters() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start());
        clock.apply_drive(&rules, 2.0, 120.0).unwrap();

        assert_eq!(clock.driving_hours_used_in_shift(), 2.0);
        assert_eq!(clock.on_duty_hours_used_in_shift(), 2.0);
        assert_eq!(clock.driving_since_last_break_hours(), 2.0);
        assert_eq!(clock.cycle_hours_used(), 2.0);
        assert_eq!(clock.miles_since_last_fuel, 120.0);
        assert_eq!(clock.current_time, start() + chrono::Duration::hours(2));
    }

    #[test]
    fn daily_rest_resets_shift_but_not_cycle() {
        let rules = rules();
        let mut clock = DriverClock::new(20.0, start());
        clock.apply_drive(&rules, 5.0, 250.0).unwrap();
        clock.apply_daily_rest(&rules).unwrap();

        assert_eq!(clock.driving_hours_used_in_shift(), 0.0);
        assert_eq!(clock.on_duty_hours_used_in_shift(), 0.0);
        assert_eq!(clock.driving_since_last_break_hours(), 0.0);
        assert_eq!(clock.cycle_hours_used(), 25.0);
    }

    #[test]
    fn cycle_restart_resets_everything() {
        let rules = rules();
        let mut clock = DriverClock::new(69.0, start());
        clock.apply_drive(&rules, 1.0, 50.0).unwrap();
        clock.apply_cycle_restart(&rules).unwrap();

        assert_eq!(clock.cycle_hours_used(), 0.0);
        assert_eq!(clock.driving_hours_used_in_shift(), 0.0);
    }

    #[test]
    fn fueling_resets_odometer_but_not_driving() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start());
        clock.apply_drive(&rules, 1.0, 1000.0).unwrap();
        clock.apply_fueling(&rules).unwrap();

        assert_eq!(clock.miles_since_last_fuel, 0.0);
        assert_eq!(clock.driving_hours_used_in_shift(), 1.0);
        assert_eq!(clock.on_duty_hours_used_in_shift(), 1.0 + rules.fuel_stop_hours);
    }

    #[test]
    fn remaining_helpers_saturate_at_zero() {
        let rules = rules();
        let mut clock = DriverClock::new(0.0, start());
        clock.apply_drive(&rules, 11.0, 0.0).unwrap();
        assert_eq!(clock.remaining_driving(&rules), 0.0);
    }
}
