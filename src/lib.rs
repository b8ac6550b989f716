//! Off-grid household solar budget simulator.
//!
//! A [`household::Household`] describes solar hardware and appliances;
//! [`sim::engine`] walks it hour by hour over several days, deciding which
//! appliances the panel and battery can power.

#[cfg(feature = "api")]
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod household;
/// Household persistence and result export.
pub mod io;
pub mod logging;
/// Generation profile, hourly allocation, and the multi-day driver.
pub mod sim;
