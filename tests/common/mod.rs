//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveTime;

use solar_budget::household::{
    Appliance, ComponentRole, Household, Priority, SolarComponent, SystemVoltage,
};

/// Tolerance for comparing energy values (Wh).
pub const EPS: f64 = 1e-9;

/// Whole-hour time of day.
pub fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

/// Household with all four components and no appliances.
pub fn household(panel_w: f64, battery_wh: f64) -> Household {
    let mut h = Household::new();
    h.configure(
        SolarComponent::for_role(ComponentRole::SolarPanel, panel_w).unwrap(),
        SolarComponent::for_role(ComponentRole::Battery, battery_wh).unwrap(),
        SolarComponent::for_role(ComponentRole::ChargeController, 30.0).unwrap(),
        SolarComponent::for_role(ComponentRole::Inverter, 1500.0).unwrap(),
        at(6),
        at(20),
        SystemVoltage::V12,
    );
    h
}

pub fn appliance(
    name: &str,
    power: f64,
    priority: Priority,
    window: (u32, u32),
    min_runtime: f64,
) -> Appliance {
    Appliance::new(name, power, priority, at(window.0), at(window.1), min_runtime).unwrap()
}

/// 1 kW panel, 2 kWh battery, one 500 W pump between 08:00 and 18:00 for 4 h.
pub fn pump_household() -> Household {
    let mut h = household(1000.0, 2000.0);
    h.add_appliance(appliance("Pump", 500.0, Priority::High, (8, 18), 4.0));
    h
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}
