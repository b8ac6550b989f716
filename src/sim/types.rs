//! Core simulation types: run configuration, hour inputs, and hour results.

use std::fmt;

use serde::Serialize;

use super::allocator::PriorityOrder;

/// Number of allocation steps in one simulated day.
pub const HOURS_PER_DAY: u32 = 24;

/// Longest run accepted by the engine (100 years).
pub const MAX_DAYS: usize = 36_500;

/// Run-level simulation settings.
///
/// # Examples
///
/// ```
/// use solar_budget::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(3);
/// assert_eq!(cfg.total_hours(), 72);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimConfig {
    /// Number of days to simulate. Zero is rejected when the run starts.
    pub days: usize,
    /// Order in which appliances compete for the hourly budget.
    pub priority_order: PriorityOrder,
}

impl SimConfig {
    /// Creates a configuration with the default admission order.
    pub fn new(days: usize) -> Self {
        Self {
            days,
            priority_order: PriorityOrder::default(),
        }
    }

    /// Returns a copy using `order` for admission.
    pub fn with_priority_order(mut self, order: PriorityOrder) -> Self {
        self.priority_order = order;
        self
    }

    /// Total number of hourly steps across all days.
    ///
    /// Saturates instead of overflowing; the engine refuses runs longer
    /// than [`MAX_DAYS`] before this is used to size anything.
    pub fn total_hours(&self) -> usize {
        self.days.saturating_mul(HOURS_PER_DAY as usize)
    }
}

/// Inputs to one hourly allocation step.
#[derive(Debug, Clone, Copy)]
pub struct HourContext {
    /// Day index (0-based).
    pub day: usize,
    /// Hour of day (0..24).
    pub hour: u32,
    /// Battery charge carried in from the previous hour (Wh).
    pub battery_in: f64,
    /// Panel rating (W), scaled by the generation profile.
    pub total_generation: f64,
    /// Battery capacity (Wh). End-of-hour charge never exceeds it.
    pub battery_capacity: f64,
}

/// Record of one simulated hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourResult {
    /// Day index (0-based).
    pub day: usize,
    /// Hour of day (0..24).
    pub hour: u32,
    /// Solar energy produced this hour (Wh).
    pub generation: f64,
    /// Energy drawn by admitted appliances (Wh).
    pub power_used: f64,
    /// Battery charge at the end of the hour (Wh).
    pub battery_charge: f64,
    /// Energy discarded because the battery was full (Wh).
    pub curtailed: f64,
    /// Names of the appliances that ran, in admission order.
    pub appliances_running: Vec<String>,
}

impl HourResult {
    /// Position of this hour in the flattened run (`day * 24 + hour`).
    pub fn slot(&self) -> usize {
        self.day * HOURS_PER_DAY as usize + self.hour as usize
    }
}

impl fmt::Display for HourResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Day {}, Hour {:>2} | generation={:>8.2} Wh  used={:>8.2} Wh  \
             battery={:>8.2} Wh | running: ",
            self.day + 1,
            self.hour,
            self.generation,
            self.power_used,
            self.battery_charge,
        )?;
        if self.appliances_running.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&self.appliances_running.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(day: usize, hour: u32, running: &[&str]) -> HourResult {
        HourResult {
            day,
            hour,
            generation: 300.0,
            power_used: 500.0,
            battery_charge: 1800.0,
            curtailed: 0.0,
            appliances_running: running.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn sim_config_defaults_to_rank_order() {
        let cfg = SimConfig::new(2);
        assert_eq!(cfg.days, 2);
        assert_eq!(cfg.priority_order, PriorityOrder::Rank);
        assert_eq!(cfg.total_hours(), 48);
        let cfg = cfg.with_priority_order(PriorityOrder::Label);
        assert_eq!(cfg.priority_order, PriorityOrder::Label);
    }

    #[test]
    fn slot_flattens_day_and_hour() {
        assert_eq!(result(0, 5, &[]).slot(), 5);
        assert_eq!(result(2, 3, &[]).slot(), 51);
    }

    #[test]
    fn display_lists_running_appliances() {
        let s = result(0, 8, &["Pump", "Fridge"]).to_string();
        assert!(s.starts_with("Day 1, Hour  8"));
        assert!(s.ends_with("running: Pump, Fridge"));
        let idle = result(1, 23, &[]).to_string();
        assert!(idle.ends_with("running: -"));
    }
}
