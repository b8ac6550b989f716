use std::fmt;

use crate::error::InputError;

/// The four hardware slots of an off-grid installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    SolarPanel,
    Battery,
    ChargeController,
    Inverter,
}

impl ComponentRole {
    /// All roles, in the order they are checked before a simulation.
    pub const ALL: [ComponentRole; 4] = [
        ComponentRole::SolarPanel,
        ComponentRole::Battery,
        ComponentRole::ChargeController,
        ComponentRole::Inverter,
    ];

    /// Name given to a component created for this role.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::SolarPanel => "Solar Panel",
            Self::Battery => "Battery",
            Self::ChargeController => "Charge Controller",
            Self::Inverter => "Inverter",
        }
    }

    /// Key used for this role in the persisted household document.
    pub fn key(self) -> &'static str {
        match self {
            Self::SolarPanel => "solar_panel",
            Self::Battery => "battery",
            Self::ChargeController => "charge_controller",
            Self::Inverter => "inverter",
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::SolarPanel => "solar panel",
            Self::Battery => "battery",
            Self::ChargeController => "charge controller",
            Self::Inverter => "inverter",
        };
        f.write_str(s)
    }
}

/// A named capacity rating. Units depend on the slot the component fills:
/// W for panels and inverters, Wh for batteries, A for charge controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarComponent {
    pub name: String,
    pub capacity: f64,
}

impl SolarComponent {
    /// Creates a component, rejecting negative or non-finite capacities.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Negative`] if `capacity` is negative, NaN, or infinite.
    pub fn new(name: impl Into<String>, capacity: f64) -> Result<Self, InputError> {
        let name = name.into();
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(InputError::Negative {
                field: format!("{name} capacity"),
            });
        }
        Ok(Self { name, capacity })
    }

    /// Creates a component carrying the role's default name.
    ///
    /// # Errors
    ///
    /// Same as [`SolarComponent::new`].
    pub fn for_role(role: ComponentRole, capacity: f64) -> Result<Self, InputError> {
        Self::new(role.default_name(), capacity)
    }
}

impl fmt::Display for SolarComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_role_uses_default_name() {
        let battery = SolarComponent::for_role(ComponentRole::Battery, 2000.0).unwrap();
        assert_eq!(battery.name, "Battery");
        assert_eq!(battery.capacity, 2000.0);
    }

    #[test]
    fn rejects_negative_capacity() {
        assert!(SolarComponent::new("Panel", -1.0).is_err());
        assert!(SolarComponent::new("Panel", f64::NAN).is_err());
        assert!(SolarComponent::new("Panel", 0.0).is_ok());
    }

    #[test]
    fn role_metadata() {
        assert_eq!(ComponentRole::SolarPanel.key(), "solar_panel");
        assert_eq!(ComponentRole::Inverter.to_string(), "inverter");
    }
}
