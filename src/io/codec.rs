//! JSON persistence of household configuration.
//!
//! The document layout is fixed: every key is always written, absent
//! components are written as `null`, and times are zero-padded `HH:mm`.
//! Numbers are always written as floats, so a document this module wrote
//! reads back and re-serializes to the same text. Integer literals in a
//! hand-written file load fine and come back as `500.0`.
//! Simulation runtime is never persisted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use crate::error::{InputError, PersistenceError};
use crate::household::input::{format_time, parse_time};
use crate::household::{Appliance, ComponentRole, Household, SolarComponent, SystemVoltage};

/// Persisted form of a [`SolarComponent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub capacity: f64,
}

/// Persisted form of an [`Appliance`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplianceRecord {
    pub name: String,
    pub power: f64,
    /// `"Low"`, `"Medium"`, or `"High"`.
    pub priority: String,
    /// `HH:mm`.
    pub start_time: String,
    /// `HH:mm`.
    pub end_time: String,
    pub min_runtime: f64,
}

/// Persisted form of a [`Household`].
///
/// Component keys must be present; `null` marks an unconfigured slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    #[serde(deserialize_with = "nullable")]
    pub solar_panel: Option<ComponentRecord>,
    #[serde(deserialize_with = "nullable")]
    pub battery: Option<ComponentRecord>,
    #[serde(deserialize_with = "nullable")]
    pub charge_controller: Option<ComponentRecord>,
    #[serde(deserialize_with = "nullable")]
    pub inverter: Option<ComponentRecord>,
    pub appliances: Vec<ApplianceRecord>,
    pub sunrise: String,
    pub sunset: String,
    pub system_voltage: u32,
}

/// Deserializes an optional value whose key is still required.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl From<&SolarComponent> for ComponentRecord {
    fn from(c: &SolarComponent) -> Self {
        Self {
            name: c.name.clone(),
            capacity: c.capacity,
        }
    }
}

impl From<&Appliance> for ApplianceRecord {
    fn from(a: &Appliance) -> Self {
        Self {
            name: a.name.clone(),
            power: a.power,
            priority: a.priority.label().to_string(),
            start_time: format_time(a.start_time),
            end_time: format_time(a.end_time),
            min_runtime: a.min_runtime,
        }
    }
}

impl From<&Household> for HouseholdRecord {
    fn from(h: &Household) -> Self {
        Self {
            solar_panel: h.solar_panel.as_ref().map(ComponentRecord::from),
            battery: h.battery.as_ref().map(ComponentRecord::from),
            charge_controller: h.charge_controller.as_ref().map(ComponentRecord::from),
            inverter: h.inverter.as_ref().map(ComponentRecord::from),
            appliances: h.appliances.iter().map(ApplianceRecord::from).collect(),
            sunrise: format_time(h.sunrise),
            sunset: format_time(h.sunset),
            system_voltage: h.system_voltage.volts(),
        }
    }
}

fn at(field: impl Into<String>) -> impl FnOnce(InputError) -> PersistenceError {
    let field = field.into();
    move |source| PersistenceError::InvalidField { field, source }
}

fn component(
    role: ComponentRole,
    record: Option<&ComponentRecord>,
) -> Result<Option<SolarComponent>, PersistenceError> {
    record
        .map(|r| SolarComponent::new(r.name.clone(), r.capacity))
        .transpose()
        .map_err(at(format!("$.{}.capacity", role.key())))
}

impl TryFrom<&ApplianceRecord> for Appliance {
    type Error = InputError;

    fn try_from(r: &ApplianceRecord) -> Result<Self, Self::Error> {
        Appliance::new(
            r.name.clone(),
            r.power,
            r.priority.parse()?,
            parse_time("start_time", &r.start_time)?,
            parse_time("end_time", &r.end_time)?,
            r.min_runtime,
        )
    }
}

impl TryFrom<&HouseholdRecord> for Household {
    type Error = PersistenceError;

    fn try_from(r: &HouseholdRecord) -> Result<Self, Self::Error> {
        let appliances = r
            .appliances
            .iter()
            .enumerate()
            .map(|(i, a)| Appliance::try_from(a).map_err(at(format!("$.appliances[{i}]"))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Household {
            solar_panel: component(ComponentRole::SolarPanel, r.solar_panel.as_ref())?,
            battery: component(ComponentRole::Battery, r.battery.as_ref())?,
            charge_controller: component(
                ComponentRole::ChargeController,
                r.charge_controller.as_ref(),
            )?,
            inverter: component(ComponentRole::Inverter, r.inverter.as_ref())?,
            appliances,
            sunrise: parse_time("sunrise", &r.sunrise).map_err(at("$.sunrise"))?,
            sunset: parse_time("sunset", &r.sunset).map_err(at("$.sunset"))?,
            system_voltage: SystemVoltage::try_from(r.system_voltage)
                .map_err(at("$.system_voltage"))?,
        })
    }
}

/// Serializes a household as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] if serialization fails.
pub fn to_json_string(household: &Household) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string_pretty(&HouseholdRecord::from(household))?)
}

/// Parses a household from JSON text.
///
/// # Errors
///
/// Returns [`PersistenceError::Json`] for malformed JSON or missing keys and
/// [`PersistenceError::InvalidField`] for values that fail validation.
pub fn from_json_str(s: &str) -> Result<Household, PersistenceError> {
    let record: HouseholdRecord = serde_json::from_str(s)?;
    Household::try_from(&record)
}

/// Reads a household from a JSON file.
///
/// Returns a new value; callers replace their household only on success.
///
/// # Errors
///
/// Returns [`PersistenceError::Io`] if the file cannot be read, otherwise
/// as [`from_json_str`].
pub fn load(path: &Path) -> Result<Household, PersistenceError> {
    let content = fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let household = from_json_str(&content)?;
    info!(path = %path.display(), appliances = household.appliances.len(), "household loaded");
    Ok(household)
}

/// Writes a household to a JSON file, replacing any existing file.
///
/// # Errors
///
/// Returns [`PersistenceError::Io`] if the file cannot be written.
pub fn save(path: &Path, household: &Household) -> Result<(), PersistenceError> {
    let json = to_json_string(household)?;
    fs::write(path, json).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "household saved");
    Ok(())
}
