//! Multi-day driver that threads battery charge through hourly allocation steps.

use tracing::{debug, info, warn};

use super::allocator::{admission_order, allocate_hour};
use super::clock::{Clock, SimHour};
use super::runtime::RuntimeLedger;
use super::types::{HourContext, HourResult, MAX_DAYS, SimConfig};
use crate::error::PreconditionError;
use crate::household::{ComponentRole, Household};

/// Simulation engine for one run over a borrowed household.
///
/// The household is never mutated. Per-day runtime is recorded in the
/// engine's own [`RuntimeLedger`], so two engines built from the same
/// household produce identical results.
pub struct Engine<'a> {
    config: SimConfig,
    household: &'a Household,
    order: Vec<usize>,
    ledger: RuntimeLedger,
    total_generation: f64,
    battery_capacity: f64,
    battery_charge: f64,
}

impl<'a> Engine<'a> {
    /// Creates an engine with a fully charged battery.
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError`] if a component is missing, there are
    /// no appliances, or `config.days` is zero or above [`MAX_DAYS`].
    pub fn new(household: &'a Household, config: SimConfig) -> Result<Self, PreconditionError> {
        if let Err(e) = check_preconditions(household, &config) {
            warn!(error = %e, "simulation refused");
            return Err(e);
        }

        let total_generation = capacity(household, ComponentRole::SolarPanel)?;
        let battery_capacity = capacity(household, ComponentRole::Battery)?;
        let order = admission_order(&household.appliances, config.priority_order);

        Ok(Self {
            config,
            household,
            order,
            ledger: RuntimeLedger::new(),
            total_generation,
            battery_capacity,
            battery_charge: battery_capacity,
        })
    }

    /// Executes one hourly step and carries its battery charge forward.
    ///
    /// The day's runtime counters are reset when `slot` is the first hour
    /// of a day.
    pub fn step(&mut self, slot: SimHour) -> HourResult {
        if slot.starts_day() {
            self.ledger
                .reset_day(slot.day, self.household.appliances.len());
        }

        let ctx = HourContext {
            day: slot.day,
            hour: slot.hour,
            battery_in: self.battery_charge,
            total_generation: self.total_generation,
            battery_capacity: self.battery_capacity,
        };
        let result = allocate_hour(&ctx, &self.household.appliances, &self.order, &mut self.ledger);
        self.battery_charge = result.battery_charge;

        debug!(
            day = result.day,
            hour = result.hour,
            generation = result.generation,
            used = result.power_used,
            battery = result.battery_charge,
            running = result.appliances_running.len(),
            "hour simulated"
        );
        result
    }

    /// Executes every hour of every configured day.
    pub fn run(&mut self) -> Vec<HourResult> {
        info!(
            days = self.config.days,
            appliances = self.household.appliances.len(),
            order = %self.config.priority_order,
            "starting simulation"
        );

        let mut results = Vec::with_capacity(self.config.total_hours());
        let mut clock = Clock::new(self.config.days);
        clock.run(|slot| results.push(self.step(slot)));

        info!(
            hours = results.len(),
            final_battery = self.battery_charge,
            "simulation finished"
        );
        results
    }

    /// Runtime recorded so far in this run.
    pub fn ledger(&self) -> &RuntimeLedger {
        &self.ledger
    }

    /// Battery charge to be carried into the next step (Wh).
    pub fn battery_charge(&self) -> f64 {
        self.battery_charge
    }

    /// Returns a reference to the simulation configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

/// Simulates `num_days` days of `household` with the default admission order.
///
/// # Errors
///
/// Returns a [`PreconditionError`] before any hour is simulated.
pub fn simulate(
    household: &Household,
    num_days: usize,
) -> Result<Vec<HourResult>, PreconditionError> {
    let mut engine = Engine::new(household, SimConfig::new(num_days))?;
    Ok(engine.run())
}

fn check_preconditions(household: &Household, config: &SimConfig) -> Result<(), PreconditionError> {
    household.check_ready()?;
    if config.days == 0 {
        return Err(PreconditionError::ZeroDays);
    }
    if config.days > MAX_DAYS {
        return Err(PreconditionError::TooManyDays {
            days: config.days,
            max: MAX_DAYS,
        });
    }
    Ok(())
}

fn capacity(household: &Household, role: ComponentRole) -> Result<f64, PreconditionError> {
    household
        .component(role)
        .map(|c| c.capacity)
        .ok_or(PreconditionError::MissingComponent(role))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::household::{Appliance, Priority, SolarComponent, SystemVoltage};

    fn at(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn household(panel: f64, battery: f64) -> Household {
        let mut h = Household::new();
        h.configure(
            SolarComponent::for_role(ComponentRole::SolarPanel, panel).unwrap(),
            SolarComponent::for_role(ComponentRole::Battery, battery).unwrap(),
            SolarComponent::for_role(ComponentRole::ChargeController, 30.0).unwrap(),
            SolarComponent::for_role(ComponentRole::Inverter, 1000.0).unwrap(),
            at(6),
            at(20),
            SystemVoltage::V12,
        );
        h
    }

    #[test]
    fn refuses_incomplete_household() {
        let h = household(1000.0, 2000.0);
        assert_eq!(
            Engine::new(&h, SimConfig::new(1)).err(),
            Some(PreconditionError::NoAppliances)
        );

        let mut h = Household::new();
        h.add_appliance(Appliance::new("a", 1.0, Priority::Low, at(0), at(1), 1.0).unwrap());
        assert_eq!(
            Engine::new(&h, SimConfig::new(1)).err(),
            Some(PreconditionError::MissingComponent(ComponentRole::SolarPanel))
        );
    }

    #[test]
    fn refuses_zero_days() {
        let mut h = household(1000.0, 2000.0);
        h.add_appliance(Appliance::new("a", 1.0, Priority::Low, at(0), at(1), 1.0).unwrap());
        assert_eq!(
            Engine::new(&h, SimConfig::new(0)).err(),
            Some(PreconditionError::ZeroDays)
        );
    }

    #[test]
    fn refuses_overlong_runs() {
        let mut h = household(1000.0, 2000.0);
        h.add_appliance(Appliance::new("a", 1.0, Priority::Low, at(0), at(1), 1.0).unwrap());
        for days in [MAX_DAYS + 1, usize::MAX / 24 + 1, usize::MAX] {
            assert_eq!(
                Engine::new(&h, SimConfig::new(days)).err(),
                Some(PreconditionError::TooManyDays {
                    days,
                    max: MAX_DAYS
                })
            );
        }
        assert!(Engine::new(&h, SimConfig::new(MAX_DAYS)).is_ok());
    }

    #[test]
    fn battery_starts_full() {
        let mut h = household(500.0, 1234.0);
        h.add_appliance(Appliance::new("a", 1.0, Priority::Low, at(0), at(1), 1.0).unwrap());
        let engine = Engine::new(&h, SimConfig::new(1)).unwrap();
        assert_eq!(engine.battery_charge(), 1234.0);
    }

    #[test]
    fn step_threads_battery_charge() {
        let mut h = household(0.0, 1000.0);
        h.add_appliance(Appliance::new("fan", 100.0, Priority::Low, at(0), at(12), 12.0).unwrap());
        let mut engine = Engine::new(&h, SimConfig::new(1)).unwrap();
        let r0 = engine.step(SimHour { day: 0, hour: 0 });
        let r1 = engine.step(SimHour { day: 0, hour: 1 });
        assert_eq!(r0.battery_charge, 900.0);
        assert_eq!(r1.battery_charge, 800.0);
        assert_eq!(engine.battery_charge(), 800.0);
        assert_eq!(engine.ledger().get_daily_runtime(0, 0), 2.0);
    }

    #[test]
    fn run_length_is_days_times_24() {
        let mut h = household(1000.0, 2000.0);
        h.add_appliance(Appliance::new("a", 10.0, Priority::Low, at(8), at(9), 1.0).unwrap());
        let results = simulate(&h, 3).unwrap();
        assert_eq!(results.len(), 72);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.slot(), i);
        }
    }
}
