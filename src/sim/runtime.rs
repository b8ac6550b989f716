//! Per-run runtime accounting.

use std::collections::BTreeMap;

/// Hours each appliance has run on each simulated day.
///
/// Keyed by `(appliance index, day)` where the index refers to the
/// household's appliance list. A fresh ledger belongs to every simulation
/// run, so appliance configuration is never mutated by simulating.
///
/// # Examples
///
/// ```
/// use solar_budget::sim::runtime::RuntimeLedger;
///
/// let mut ledger = RuntimeLedger::new();
/// ledger.add_runtime(0, 1, 1.0);
/// ledger.add_runtime(0, 1, 1.0);
/// assert_eq!(ledger.get_daily_runtime(0, 1), 2.0);
/// assert_eq!(ledger.get_daily_runtime(0, 0), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeLedger {
    hours: BTreeMap<(usize, usize), f64>,
}

impl RuntimeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime of appliances `0..appliance_count` on `day` to zero.
    pub fn reset_day(&mut self, day: usize, appliance_count: usize) {
        for appliance in 0..appliance_count {
            self.hours.insert((appliance, day), 0.0);
        }
    }

    /// Adds `hours` of runtime for `appliance` on `day`.
    pub fn add_runtime(&mut self, appliance: usize, day: usize, hours: f64) {
        *self.hours.entry((appliance, day)).or_insert(0.0) += hours;
    }

    /// Runtime recorded for `appliance` on `day`, or 0 if none.
    pub fn get_daily_runtime(&self, appliance: usize, day: usize) -> f64 {
        self.hours.get(&(appliance, day)).copied().unwrap_or(0.0)
    }

    /// Total runtime recorded for `appliance` across all days.
    pub fn total_runtime(&self, appliance: usize) -> f64 {
        self.hours
            .iter()
            .filter(|((a, _), _)| *a == appliance)
            .map(|(_, h)| h)
            .sum()
    }
}
