//! Household configuration: solar hardware, appliances, and system settings.

/// Schedulable loads and their priority and time window.
pub mod appliance;
/// Named capacity ratings for the four hardware slots.
pub mod component;
pub mod input;

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

pub use appliance::{Appliance, Priority};
pub use component::{ComponentRole, SolarComponent};

use crate::error::{InputError, PreconditionError};
use crate::sim::engine::Engine;
use crate::sim::types::{HourResult, SimConfig};
use input::ComponentDraft;

/// DC bus voltage of the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SystemVoltage {
    #[default]
    V12,
    V24,
}

impl SystemVoltage {
    pub fn volts(self) -> u32 {
        match self {
            Self::V12 => 12,
            Self::V24 => 24,
        }
    }
}

impl TryFrom<u32> for SystemVoltage {
    type Error = InputError;

    fn try_from(volts: u32) -> Result<Self, Self::Error> {
        match volts {
            12 => Ok(Self::V12),
            24 => Ok(Self::V24),
            other => Err(InputError::InvalidVoltage(other)),
        }
    }
}

impl From<SystemVoltage> for u32 {
    fn from(v: SystemVoltage) -> Self {
        v.volts()
    }
}

impl fmt::Display for SystemVoltage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}V", self.volts())
    }
}

/// Aggregate root: solar hardware ratings, appliances, and system settings.
///
/// A household is the unit of persistence (see [`crate::io::codec`]) and
/// the input to a simulation run. Simulations borrow it immutably, so the
/// same household can be simulated repeatedly with identical results.
#[derive(Debug, Clone, PartialEq)]
pub struct Household {
    /// Panel rating (W).
    pub solar_panel: Option<SolarComponent>,
    /// Battery capacity (Wh).
    pub battery: Option<SolarComponent>,
    /// Charge controller rating (A).
    pub charge_controller: Option<SolarComponent>,
    /// Inverter rating (W).
    pub inverter: Option<SolarComponent>,
    /// Appliances in insertion order.
    pub appliances: Vec<Appliance>,
    /// Informational only. Generation follows the fixed hourly profile.
    pub sunrise: NaiveTime,
    /// Informational only. Generation follows the fixed hourly profile.
    pub sunset: NaiveTime,
    pub system_voltage: SystemVoltage,
}

impl Default for Household {
    fn default() -> Self {
        Self {
            solar_panel: None,
            battery: None,
            charge_controller: None,
            inverter: None,
            appliances: Vec::new(),
            sunrise: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            sunset: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            system_voltage: SystemVoltage::V12,
        }
    }
}

impl Household {
    /// Creates an empty household with default system settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all four components and the system settings.
    #[expect(clippy::too_many_arguments)]
    pub fn configure(
        &mut self,
        solar_panel: SolarComponent,
        battery: SolarComponent,
        charge_controller: SolarComponent,
        inverter: SolarComponent,
        sunrise: NaiveTime,
        sunset: NaiveTime,
        system_voltage: SystemVoltage,
    ) {
        self.solar_panel = Some(solar_panel);
        self.battery = Some(battery);
        self.charge_controller = Some(charge_controller);
        self.inverter = Some(inverter);
        self.sunrise = sunrise;
        self.sunset = sunset;
        self.system_voltage = system_voltage;
    }

    /// Sets the four component capacities from form text.
    ///
    /// # Errors
    ///
    /// Returns the first [`InputError`]; the household is unchanged on error.
    pub fn configure_from_text(&mut self, draft: &ComponentDraft) -> Result<(), InputError> {
        let [panel, battery, controller, inverter] = draft.parse()?;
        self.solar_panel = Some(panel);
        self.battery = Some(battery);
        self.charge_controller = Some(controller);
        self.inverter = Some(inverter);
        Ok(())
    }

    /// Returns the component filling `role`, if configured.
    pub fn component(&self, role: ComponentRole) -> Option<&SolarComponent> {
        match role {
            ComponentRole::SolarPanel => self.solar_panel.as_ref(),
            ComponentRole::Battery => self.battery.as_ref(),
            ComponentRole::ChargeController => self.charge_controller.as_ref(),
            ComponentRole::Inverter => self.inverter.as_ref(),
        }
    }

    /// Sets or clears the component filling `role`.
    pub fn set_component(&mut self, role: ComponentRole, component: Option<SolarComponent>) {
        let slot = match role {
            ComponentRole::SolarPanel => &mut self.solar_panel,
            ComponentRole::Battery => &mut self.battery,
            ComponentRole::ChargeController => &mut self.charge_controller,
            ComponentRole::Inverter => &mut self.inverter,
        };
        *slot = component;
    }

    /// Appends an appliance.
    pub fn add_appliance(&mut self, appliance: Appliance) {
        self.appliances.push(appliance);
    }

    /// Removes and returns the appliance at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ApplianceIndex`] if `index` is out of range.
    pub fn remove_appliance(&mut self, index: usize) -> Result<Appliance, InputError> {
        if index >= self.appliances.len() {
            return Err(InputError::ApplianceIndex {
                index,
                len: self.appliances.len(),
            });
        }
        Ok(self.appliances.remove(index))
    }

    /// Sum of all nominal appliance power ratings (W).
    pub fn total_power_consumption(&self) -> f64 {
        self.appliances.iter().map(|a| a.power).sum()
    }

    /// Checks that the household can be simulated.
    ///
    /// # Errors
    ///
    /// Returns the first missing component (in [`ComponentRole::ALL`] order),
    /// or [`PreconditionError::NoAppliances`].
    pub fn check_ready(&self) -> Result<(), PreconditionError> {
        if let Some(role) = ComponentRole::ALL
            .into_iter()
            .find(|role| self.component(*role).is_none())
        {
            return Err(PreconditionError::MissingComponent(role));
        }
        if self.appliances.is_empty() {
            return Err(PreconditionError::NoAppliances);
        }
        Ok(())
    }

    /// Simulates `num_days` days with the default admission order.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] before any hour is simulated.
    pub fn run_simulation(&self, num_days: usize) -> Result<Vec<HourResult>, PreconditionError> {
        self.run_simulation_with(&SimConfig::new(num_days))
    }

    /// Simulates with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] before any hour is simulated.
    pub fn run_simulation_with(
        &self,
        config: &SimConfig,
    ) -> Result<Vec<HourResult>, PreconditionError> {
        let mut engine = Engine::new(self, config.clone())?;
        Ok(engine.run())
    }
}
