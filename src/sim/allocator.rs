//! Hourly greedy allocation of the energy budget to appliances.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::profile::hourly_generation;
use super::runtime::RuntimeLedger;
use super::types::{HourContext, HourResult};
use crate::household::Appliance;

/// Order in which appliances compete for the hourly budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityOrder {
    /// High, then Medium, then Low; ties keep insertion order.
    #[default]
    Rank,
    /// Ascending priority label ("High" < "Low" < "Medium"); ties keep
    /// insertion order. Matches files produced by older tooling.
    Label,
    /// Insertion order, priority ignored.
    Declaration,
}

impl PriorityOrder {
    pub const NAMES: &[&str] = &["rank", "label", "declaration"];
}

impl FromStr for PriorityOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(Self::Rank),
            "label" => Ok(Self::Label),
            "declaration" => Ok(Self::Declaration),
            other => Err(format!(
                "unknown priority order \"{other}\", expected one of: {}",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rank => "rank",
            Self::Label => "label",
            Self::Declaration => "declaration",
        };
        f.write_str(s)
    }
}

/// Returns appliance indices in the order they are offered the budget.
pub fn admission_order(appliances: &[Appliance], order: PriorityOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..appliances.len()).collect();
    match order {
        PriorityOrder::Rank => {
            indices.sort_by_key(|&i| std::cmp::Reverse(appliances[i].priority.rank()));
        }
        PriorityOrder::Label => {
            indices.sort_by_key(|&i| appliances[i].priority.label());
        }
        PriorityOrder::Declaration => {}
    }
    indices
}

/// Runs one hourly allocation step.
///
/// Generation for the hour is added to the carried-in battery charge to
/// form the budget. Appliances are offered the budget in `order`; each one
/// inside its window, under its daily runtime target, and no larger than
/// the remaining budget is admitted and charged one hour in `ledger`.
/// Whatever remains is stored, capped at the battery capacity.
///
/// # Arguments
///
/// * `ctx` - Day, hour, carried-in charge, and hardware ratings
/// * `appliances` - Household appliance list
/// * `order` - Indices into `appliances`, see [`admission_order`]
/// * `ledger` - Runtime accounting for the current run
///
/// # Returns
///
/// The `HourResult` for this hour. `battery_charge` is the charge to carry
/// into the next hour.
pub fn allocate_hour(
    ctx: &HourContext,
    appliances: &[Appliance],
    order: &[usize],
    ledger: &mut RuntimeLedger,
) -> HourResult {
    let generation = hourly_generation(ctx.total_generation, ctx.hour);
    let mut available = generation + ctx.battery_in;
    let mut power_used = 0.0;
    let mut appliances_running = Vec::new();

    for &idx in order {
        let appliance = &appliances[idx];
        if !appliance.is_scheduled_at(ctx.hour) {
            continue;
        }

        let runtime = ledger.get_daily_runtime(idx, ctx.day);
        if available >= appliance.power && runtime < appliance.min_runtime {
            available -= appliance.power;
            power_used += appliance.power;
            ledger.add_runtime(idx, ctx.day, 1.0);
            appliances_running.push(appliance.name.clone());
            trace!(
                day = ctx.day,
                hour = ctx.hour,
                appliance = %appliance.name,
                remaining = available,
                "admitted"
            );
        } else {
            trace!(
                day = ctx.day,
                hour = ctx.hour,
                appliance = %appliance.name,
                available,
                runtime,
                "skipped"
            );
        }
    }

    let battery_charge = available.min(ctx.battery_capacity);

    HourResult {
        day: ctx.day,
        hour: ctx.hour,
        generation,
        power_used,
        battery_charge,
        curtailed: (available - battery_charge).max(0.0),
        appliances_running,
    }
}
