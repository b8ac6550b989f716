//! Error taxonomy for configuration input, simulation preconditions, and persistence.

use std::path::PathBuf;

use thiserror::Error;

use crate::household::ComponentRole;

/// Malformed user input. The household is left unchanged when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("{field}: \"{value}\" is not a valid number")]
    InvalidNumber { field: String, value: String },

    #[error("{field}: must be a finite value >= 0")]
    Negative { field: String },

    #[error("{field}: \"{value}\" is not a valid HH:mm time")]
    InvalidTime { field: String, value: String },

    #[error("priority: \"{0}\" is not one of Low, Medium, High")]
    InvalidPriority(String),

    #[error("system_voltage: {0} V is not supported (expected 12 or 24)")]
    InvalidVoltage(u32),

    #[error("appliance index {index} out of range ({len} appliances)")]
    ApplianceIndex { index: usize, len: usize },
}

/// A simulation was requested on an incomplete household.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionError {
    #[error("{0} is not configured; set all solar components before running the simulation")]
    MissingComponent(ComponentRole),

    #[error("no appliances configured; add at least one appliance before running the simulation")]
    NoAppliances,

    #[error("number of simulated days must be > 0")]
    ZeroDays,

    #[error("{days} simulated days exceeds the limit of {max}")]
    TooManyDays { days: usize, max: usize },
}

/// Loading or saving a household configuration failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("cannot access \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed household JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value at `{field}`: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: InputError,
    },
}

/// Umbrella error for callers that drive the whole workflow.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
