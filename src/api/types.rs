//! API request and response bodies.
//!
//! Household and appliance bodies reuse the persisted JSON records from
//! [`crate::io::codec`], so a file saved by the CLI can be sent to
//! `PUT /household` unchanged.

use serde::{Deserialize, Serialize};

use crate::sim::kpi::RunSummary;
use crate::sim::types::HourResult;

/// Query parameters for `POST /simulate`.
#[derive(Debug, Deserialize)]
pub struct SimulateQuery {
    /// Number of days; falls back to the server's configured default.
    pub days: Option<usize>,
}

/// Hour results and summary of one simulation run.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub results: Vec<HourResult>,
    pub summary: RunSummary,
}

/// Nominal power draw of every appliance combined.
#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    pub total_power_w: f64,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
