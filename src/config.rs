//! TOML-based run configuration and built-in household presets.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::NaiveTime;
use serde::Deserialize;

use crate::household::{
    Appliance, ComponentRole, Household, Priority, SolarComponent, SystemVoltage,
};
use crate::sim::allocator::PriorityOrder;
use crate::sim::types::{MAX_DAYS, SimConfig};

/// Top-level run configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`RunConfig::from_toml_file`] or start from [`RunConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Simulation horizon and admission order.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Log verbosity.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Simulation horizon and admission order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate (1..=36500).
    pub days: usize,
    /// Admission order: `"rank"`, `"label"`, or `"declaration"`.
    pub priority_order: PriorityOrder,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 3,
            priority_order: PriorityOrder::Rank,
        }
    }
}

/// Log verbosity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.days"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

impl RunConfig {
    /// Engine settings for this run.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::new(self.simulation.days).with_priority_order(self.simulation.priority_order)
    }

    /// Parses a run configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a run configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.days == 0 {
            errors.push(ConfigError {
                field: "simulation.days".into(),
                message: "must be > 0".into(),
            });
        } else if self.simulation.days > MAX_DAYS {
            errors.push(ConfigError {
                field: "simulation.days".into(),
                message: format!("must be <= {MAX_DAYS}, got {}", self.simulation.days),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ConfigError {
                field: "logging.level".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            });
        }

        errors
    }
}

/// Available household preset names.
pub const HOUSEHOLD_PRESETS: &[&str] = &["cabin", "workshop"];

/// Loads a built-in household by name.
///
/// # Errors
///
/// Returns a `ConfigError` if the preset name is unknown.
pub fn household_preset(name: &str) -> Result<Household, ConfigError> {
    match name {
        "cabin" => Ok(cabin()),
        "workshop" => Ok(workshop()),
        _ => Err(ConfigError {
            field: "preset".to_string(),
            message: format!(
                "unknown preset \"{name}\", available: {}",
                HOUSEHOLD_PRESETS.join(", ")
            ),
        }),
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn rated(role: ComponentRole, capacity: f64) -> Option<SolarComponent> {
    Some(SolarComponent {
        name: role.default_name().to_string(),
        capacity,
    })
}

fn load(
    name: &str,
    power: f64,
    priority: Priority,
    window: (NaiveTime, NaiveTime),
    min_runtime: f64,
) -> Appliance {
    Appliance {
        name: name.to_string(),
        power,
        priority,
        start_time: window.0,
        end_time: window.1,
        min_runtime,
    }
}

/// Small 12 V off-grid cabin: 1 kW of panels and a 2 kWh battery.
pub fn cabin() -> Household {
    Household {
        solar_panel: rated(ComponentRole::SolarPanel, 1000.0),
        battery: rated(ComponentRole::Battery, 2000.0),
        charge_controller: rated(ComponentRole::ChargeController, 40.0),
        inverter: rated(ComponentRole::Inverter, 1500.0),
        appliances: vec![
            load("Fridge", 150.0, Priority::High, (hm(0, 0), hm(23, 59)), 16.0),
            load("Water Pump", 500.0, Priority::High, (hm(8, 0), hm(18, 0)), 4.0),
            load("Lights", 60.0, Priority::Medium, (hm(18, 0), hm(23, 0)), 4.0),
            load("Laptop", 65.0, Priority::Low, (hm(9, 0), hm(17, 0)), 6.0),
        ],
        sunrise: hm(6, 0),
        sunset: hm(20, 0),
        system_voltage: SystemVoltage::V12,
    }
}

/// 24 V workshop with power tools competing for a midday surplus.
pub fn workshop() -> Household {
    Household {
        solar_panel: rated(ComponentRole::SolarPanel, 3000.0),
        battery: rated(ComponentRole::Battery, 5000.0),
        charge_controller: rated(ComponentRole::ChargeController, 60.0),
        inverter: rated(ComponentRole::Inverter, 3000.0),
        appliances: vec![
            load("Lights", 120.0, Priority::High, (hm(7, 0), hm(19, 0)), 8.0),
            load("Table Saw", 1800.0, Priority::Medium, (hm(9, 0), hm(16, 0)), 3.0),
            load("Compressor", 1200.0, Priority::Low, (hm(10, 0), hm(15, 0)), 2.0),
            load("Night Heater", 700.0, Priority::Low, (hm(22, 0), hm(6, 0)), 3.0),
        ],
        sunrise: hm(6, 30),
        sunset: hm(19, 30),
        system_voltage: SystemVoltage::V24,
    }
}
