//! Post-hoc summary computed from the hour results of a run.

use std::fmt;

use serde::Serialize;

use super::types::{HOURS_PER_DAY, HourResult};
use crate::household::Household;

/// Runtime outcome for one appliance name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceReport {
    pub name: String,
    /// Daily runtime target (h).
    pub min_runtime: f64,
    /// Hours the appliance ran across the whole run.
    pub hours_run: usize,
    /// Days on which the runtime target was reached.
    pub days_met: usize,
}

/// Aggregate indicators derived from a complete run.
///
/// Computed from the result records alone, so the numbers always agree
/// with what was reported hour by hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Number of simulated days.
    pub days: usize,
    /// Total solar generation (Wh).
    pub total_generation_wh: f64,
    /// Total energy delivered to appliances (Wh).
    pub total_used_wh: f64,
    /// Energy lost to a full battery (Wh).
    pub total_curtailed_wh: f64,
    /// Lowest end-of-hour battery charge (Wh).
    pub min_battery_wh: f64,
    /// Battery charge after the last hour (Wh).
    pub final_battery_wh: f64,
    /// Hours in which at least one appliance ran.
    pub active_hours: usize,
    /// One entry per distinct appliance name, in household order.
    pub appliances: Vec<ApplianceReport>,
}

impl RunSummary {
    /// Computes the summary of `results` for the household that produced them.
    ///
    /// Appliances sharing a name are reported once, with the first
    /// appliance's runtime target.
    pub fn from_results(results: &[HourResult], household: &Household) -> Self {
        let days = results.iter().map(|r| r.day + 1).max().unwrap_or(0);

        let mut appliances: Vec<ApplianceReport> = Vec::new();
        for a in &household.appliances {
            if appliances.iter().any(|r| r.name == a.name) {
                continue;
            }
            let per_day = daily_hours(results, &a.name, days);
            appliances.push(ApplianceReport {
                name: a.name.clone(),
                min_runtime: a.min_runtime,
                hours_run: per_day.iter().sum(),
                days_met: per_day
                    .iter()
                    .filter(|&&h| h as f64 >= a.min_runtime)
                    .count(),
            });
        }

        Self {
            days,
            total_generation_wh: results.iter().map(|r| r.generation).sum(),
            total_used_wh: results.iter().map(|r| r.power_used).sum(),
            total_curtailed_wh: results.iter().map(|r| r.curtailed).sum(),
            min_battery_wh: results
                .iter()
                .map(|r| r.battery_charge)
                .reduce(f64::min)
                .unwrap_or(0.0),
            final_battery_wh: results.last().map_or(0.0, |r| r.battery_charge),
            active_hours: results
                .iter()
                .filter(|r| !r.appliances_running.is_empty())
                .count(),
            appliances,
        }
    }
}

/// Hours `name` ran on each of `days` days.
fn daily_hours(results: &[HourResult], name: &str, days: usize) -> Vec<usize> {
    let mut per_day = vec![0; days];
    for r in results {
        let ran = r.appliances_running.iter().filter(|n| *n == name).count();
        if let Some(slot) = per_day.get_mut(r.day) {
            *slot += ran;
        }
    }
    per_day
}

/// Running status of `name` for every hour of the run (1 = running).
pub fn appliance_status(results: &[HourResult], name: &str) -> Vec<u8> {
    results
        .iter()
        .map(|r| u8::from(r.appliances_running.iter().any(|n| n == name)))
        .collect()
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(
            f,
            "Simulated:             {} days ({} hours)",
            self.days,
            self.days * HOURS_PER_DAY as usize
        )?;
        writeln!(f, "Solar generation:      {:.2} Wh", self.total_generation_wh)?;
        writeln!(f, "Power used:            {:.2} Wh", self.total_used_wh)?;
        writeln!(f, "Curtailed:             {:.2} Wh", self.total_curtailed_wh)?;
        writeln!(f, "Minimum battery:       {:.2} Wh", self.min_battery_wh)?;
        writeln!(f, "Final battery:         {:.2} Wh", self.final_battery_wh)?;
        write!(f, "Active hours:          {}", self.active_hours)?;
        for a in &self.appliances {
            write!(
                f,
                "\n  {}: {} h run, target met on {}/{} days",
                a.name, a.hours_run, a.days_met, self.days
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::household::{Appliance, Priority};

    fn make_result(day: usize, hour: u32, battery: f64, running: &[&str]) -> HourResult {
        HourResult {
            day,
            hour,
            generation: 100.0,
            power_used: 50.0 * running.len() as f64,
            battery_charge: battery,
            curtailed: 10.0,
            appliances_running: running.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn household_with(names: &[(&str, f64)]) -> Household {
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        let mut h = Household::new();
        for (name, min_runtime) in names {
            h.add_appliance(Appliance::new(*name, 50.0, Priority::Low, t, t, *min_runtime).unwrap());
        }
        h
    }

    #[test]
    fn empty_results_give_zeroed_summary() {
        let s = RunSummary::from_results(&[], &household_with(&[("pump", 2.0)]));
        assert_eq!(s.days, 0);
        assert_eq!(s.total_generation_wh, 0.0);
        assert_eq!(s.min_battery_wh, 0.0);
        assert_eq!(s.appliances[0].hours_run, 0);
    }

    #[test]
    fn totals_and_battery_extremes() {
        let results = vec![
            make_result(0, 0, 900.0, &["pump"]),
            make_result(0, 1, 700.0, &[]),
            make_result(1, 0, 800.0, &["pump", "fan"]),
        ];
        let s = RunSummary::from_results(&results, &household_with(&[("pump", 1.0), ("fan", 2.0)]));
        assert_eq!(s.days, 2);
        assert_eq!(s.total_generation_wh, 300.0);
        assert_eq!(s.total_used_wh, 150.0);
        assert_eq!(s.total_curtailed_wh, 30.0);
        assert_eq!(s.min_battery_wh, 700.0);
        assert_eq!(s.final_battery_wh, 800.0);
        assert_eq!(s.active_hours, 2);

        assert_eq!(s.appliances[0].hours_run, 2);
        assert_eq!(s.appliances[0].days_met, 2);
        assert_eq!(s.appliances[1].hours_run, 1);
        assert_eq!(s.appliances[1].days_met, 0);
    }

    #[test]
    fn duplicate_names_reported_once() {
        let s = RunSummary::from_results(&[], &household_with(&[("pump", 1.0), ("pump", 3.0)]));
        assert_eq!(s.appliances.len(), 1);
        assert_eq!(s.appliances[0].min_runtime, 1.0);
    }

    #[test]
    fn status_series_marks_running_hours() {
        let results = vec![
            make_result(0, 0, 0.0, &["pump"]),
            make_result(0, 1, 0.0, &["fan"]),
            make_result(0, 2, 0.0, &["fan", "pump"]),
        ];
        assert_eq!(appliance_status(&results, "pump"), vec![1, 0, 1]);
        assert_eq!(appliance_status(&results, "kettle"), vec![0, 0, 0]);
    }

    #[test]
    fn display_has_header() {
        let s = RunSummary::from_results(&[make_result(0, 0, 1.0, &[])], &household_with(&[]));
        let text = s.to_string();
        assert!(text.starts_with("--- Run Summary ---"));
        assert!(text.contains("Final battery:         1.00 Wh"));
    }
}
