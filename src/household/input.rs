//! Validation of free-text form fields into household values.
//!
//! Front ends collect capacities, power ratings, and times as text. These
//! helpers turn that text into typed values or an [`InputError`] naming the
//! offending field, without touching any household state.

use chrono::NaiveTime;

use super::appliance::{Appliance, Priority};
use super::component::{ComponentRole, SolarComponent};
use crate::error::InputError;

/// Time-of-day format used for input and persistence.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a non-negative, finite quantity (W, Wh, A, or hours).
///
/// # Errors
///
/// Returns [`InputError::InvalidNumber`] for non-numeric text and
/// [`InputError::Negative`] for negative or non-finite values.
pub fn parse_quantity(field: &str, text: &str) -> Result<f64, InputError> {
    let value: f64 = text.trim().parse().map_err(|_| InputError::InvalidNumber {
        field: field.to_string(),
        value: text.to_string(),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(InputError::Negative {
            field: field.to_string(),
        });
    }
    Ok(value)
}

/// Parses a zero-padded `HH:mm` 24-hour time of day.
///
/// Only the exact form [`format_time`] writes is accepted: `"8:00"` and
/// `" 08:00"` are rejected.
///
/// # Errors
///
/// Returns [`InputError::InvalidTime`] if `text` is not a valid time.
pub fn parse_time(field: &str, text: &str) -> Result<NaiveTime, InputError> {
    let invalid = || InputError::InvalidTime {
        field: field.to_string(),
        value: text.to_string(),
    };
    let bytes = text.as_bytes();
    let padded = bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
    if !padded {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(text, TIME_FORMAT).map_err(|_| invalid())
}

/// Formats a time of day as zero-padded `HH:mm`.
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Raw capacity text for the four component slots.
#[derive(Debug, Clone, Default)]
pub struct ComponentDraft {
    pub solar_panel: String,
    pub battery: String,
    pub charge_controller: String,
    pub inverter: String,
}

impl ComponentDraft {
    /// Parses all four capacities, failing on the first invalid one.
    ///
    /// Returned components carry their role's default name and are ordered
    /// as [`ComponentRole::ALL`].
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`] encountered.
    pub fn parse(&self) -> Result<[SolarComponent; 4], InputError> {
        let [panel, battery, controller, inverter] = ComponentRole::ALL;
        Ok([
            component(panel, &self.solar_panel)?,
            component(battery, &self.battery)?,
            component(controller, &self.charge_controller)?,
            component(inverter, &self.inverter)?,
        ])
    }
}

fn component(role: ComponentRole, text: &str) -> Result<SolarComponent, InputError> {
    let capacity = parse_quantity(role.key(), text)?;
    SolarComponent::for_role(role, capacity)
}

/// Raw appliance form fields.
#[derive(Debug, Clone, Default)]
pub struct ApplianceDraft {
    pub name: String,
    pub power: String,
    pub priority: String,
    pub start_time: String,
    pub end_time: String,
    pub min_runtime: String,
}

impl TryFrom<&ApplianceDraft> for Appliance {
    type Error = InputError;

    fn try_from(d: &ApplianceDraft) -> Result<Self, Self::Error> {
        let power = parse_quantity("power", &d.power)?;
        let priority: Priority = d.priority.parse()?;
        let start_time = parse_time("start_time", &d.start_time)?;
        let end_time = parse_time("end_time", &d.end_time)?;
        let min_runtime = parse_quantity("min_runtime", &d.min_runtime)?;
        Appliance::new(
            d.name.clone(),
            power,
            priority,
            start_time,
            end_time,
            min_runtime,
        )
    }
}
