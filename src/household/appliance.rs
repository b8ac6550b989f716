use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Scheduling priority of an appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Label as shown to users and written to the household document.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Numeric rank, higher admits first under rank ordering.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            other => Err(InputError::InvalidPriority(other.to_string())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `true` if `hour` lies in the `[start_hour, end_hour)` window.
///
/// A window with `start_hour > end_hour` wraps past midnight. Equal bounds
/// describe an empty window.
///
/// # Examples
///
/// ```
/// use solar_budget::household::appliance::window_contains;
///
/// assert!(window_contains(22, 6, 23));
/// assert!(window_contains(22, 6, 3));
/// assert!(!window_contains(22, 6, 10));
/// assert!(window_contains(8, 18, 8));
/// assert!(!window_contains(8, 18, 18));
/// ```
pub fn window_contains(start_hour: u32, end_hour: u32, hour: u32) -> bool {
    if start_hour <= end_hour {
        start_hour <= hour && hour < end_hour
    } else {
        hour >= start_hour || hour < end_hour
    }
}

/// A schedulable load.
///
/// Appliances are immutable configuration. Runtime accumulated during a
/// simulation is tracked by [`crate::sim::runtime::RuntimeLedger`].
#[derive(Debug, Clone, PartialEq)]
pub struct Appliance {
    /// Identifier shown in results. Not required to be unique.
    pub name: String,
    /// Draw while running (W).
    pub power: f64,
    pub priority: Priority,
    /// Start of the allowed window. Only the hour is used for scheduling.
    pub start_time: NaiveTime,
    /// End of the allowed window (exclusive). Only the hour is used for scheduling.
    pub end_time: NaiveTime,
    /// Daily runtime target in hours, used as an admission cutoff.
    pub min_runtime: f64,
}

impl Appliance {
    /// Creates an appliance.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Negative`] if `power` or `min_runtime` is negative
    /// or not finite.
    pub fn new(
        name: impl Into<String>,
        power: f64,
        priority: Priority,
        start_time: NaiveTime,
        end_time: NaiveTime,
        min_runtime: f64,
    ) -> Result<Self, InputError> {
        check_non_negative("power", power)?;
        check_non_negative("min_runtime", min_runtime)?;
        Ok(Self {
            name: name.into(),
            power,
            priority,
            start_time,
            end_time,
            min_runtime,
        })
    }

    /// Returns `true` if the appliance may run during `hour` of any day.
    pub fn is_scheduled_at(&self, hour: u32) -> bool {
        window_contains(self.start_time.hour(), self.end_time.hour(), hour)
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} W) - {} priority - {} to {} - Min runtime: {}h",
            self.name,
            self.power,
            self.priority,
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            self.min_runtime,
        )
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), InputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative {
            field: field.to_string(),
        })
    }
}
