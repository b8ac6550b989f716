//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::info;

use super::AppState;
use super::types::{ConsumptionResponse, ErrorResponse, SimulateQuery, SimulateResponse};
use crate::household::{Appliance, Household};
use crate::io::codec::{ApplianceRecord, HouseholdRecord};
use crate::sim::kpi::RunSummary;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// `GET /household` → 200 + `HouseholdRecord` JSON
pub async fn get_household(State(state): State<Arc<AppState>>) -> Json<HouseholdRecord> {
    Json(HouseholdRecord::from(&*state.read()))
}

/// Replaces the household with a validated record.
///
/// `PUT /household` → 200 + the stored record
/// `PUT /household` with an invalid value → 400 + `ErrorResponse`
pub async fn put_household(
    State(state): State<Arc<AppState>>,
    Json(record): Json<HouseholdRecord>,
) -> Result<Json<HouseholdRecord>, ApiError> {
    let household =
        Household::try_from(&record).map_err(|e| error(StatusCode::BAD_REQUEST, e))?;
    let stored = HouseholdRecord::from(&household);
    *state.write() = household;
    info!(appliances = stored.appliances.len(), "household replaced");
    Ok(Json(stored))
}

/// Appends an appliance.
///
/// `POST /appliances` → 201 + the stored record
/// `POST /appliances` with an invalid value → 400 + `ErrorResponse`
pub async fn add_appliance(
    State(state): State<Arc<AppState>>,
    Json(record): Json<ApplianceRecord>,
) -> Result<(StatusCode, Json<ApplianceRecord>), ApiError> {
    let appliance = Appliance::try_from(&record).map_err(|e| error(StatusCode::BAD_REQUEST, e))?;
    let stored = ApplianceRecord::from(&appliance);
    state.write().add_appliance(appliance);
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Removes the appliance at `index`.
///
/// `DELETE /appliances/{index}` → 204
/// `DELETE /appliances/{index}` past the end → 404 + `ErrorResponse`
pub async fn remove_appliance(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<StatusCode, ApiError> {
    state
        .write()
        .remove_appliance(index)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| error(StatusCode::NOT_FOUND, e))
}

/// `GET /consumption` → 200 + `ConsumptionResponse` JSON
pub async fn get_consumption(State(state): State<Arc<AppState>>) -> Json<ConsumptionResponse> {
    Json(ConsumptionResponse {
        total_power_w: state.read().total_power_consumption(),
    })
}

/// Runs a simulation of the current household.
///
/// `POST /simulate` → 200 + `SimulateResponse` for the default horizon
/// `POST /simulate?days=N` → 200 + `SimulateResponse` for `N` days
/// Missing components, no appliances, or `days` outside 1..=36500 → 422 + `ErrorResponse`
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SimulateQuery>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let mut config = state.config.clone();
    if let Some(days) = query.days {
        config.days = days;
    }

    let household = state.household();
    let results = household
        .run_simulation_with(&config)
        .map_err(|e| error(StatusCode::UNPROCESSABLE_ENTITY, e))?;
    let summary = RunSummary::from_results(&results, &household);

    Ok(Json(SimulateResponse { results, summary }))
}
