//! REST API for editing a household and running simulations.
//!
//! Routes:
//! - `GET /household`, `PUT /household`: read or replace the configuration
//! - `POST /appliances`, `DELETE /appliances/{index}`: edit the appliance list
//! - `GET /consumption`: nominal power of all appliances
//! - `POST /simulate?days=N`: run a simulation and return results plus summary

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use axum::Router;
use axum::routing::{delete, get, post};

use crate::household::Household;
use crate::sim::types::SimConfig;

pub use types::{ConsumptionResponse, ErrorResponse, SimulateQuery, SimulateResponse};

/// Application state shared across all request handlers.
///
/// The household is behind a lock because `PUT /household` and the
/// appliance routes edit it in place. Simulations take a read lock and
/// never mutate it.
pub struct AppState {
    household: RwLock<Household>,
    /// Defaults for `POST /simulate` when no query is given.
    pub config: SimConfig,
}

impl AppState {
    pub fn new(household: Household, config: SimConfig) -> Self {
        Self {
            household: RwLock::new(household),
            config,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Household> {
        self.household.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Household> {
        self.household.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current household.
    pub fn household(&self) -> Household {
        self.read().clone()
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/household",
            get(handlers::get_household).put(handlers::put_household),
        )
        .route("/appliances", post(handlers::add_appliance))
        .route("/appliances/{index}", delete(handlers::remove_appliance))
        .route("/consumption", get(handlers::get_consumption))
        .route("/simulate", post(handlers::simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API until the server stops.
///
/// # Errors
///
/// Returns an I/O error if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    eprintln!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
