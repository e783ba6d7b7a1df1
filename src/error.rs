//! Error types for the simulation core
//!
//! Only programming-invariant violations surface as errors. Expected
//! boundary conditions are no-ops and game-over is a state transition.

use thiserror::Error;

use crate::sim::atlas::Tier;
use crate::sim::events::ComponentId;

/// Invariant violations raised while running the simulation
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("elapsed time must be non-negative and finite, got {0}")]
    InvalidDelta(f32),
    #[error("event published by unregistered sender {0:?}")]
    UnregisteredSender(ComponentId),
    #[error("unknown pattern symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("spawn pattern has no rows")]
    EmptyPattern,
    #[error("tier {0:?} has no spawn patterns")]
    EmptyTier(Tier),
    #[error("event dispatch nested deeper than {0} levels")]
    DispatchTooDeep(usize),
    #[error("malformed pattern catalogue: {0}")]
    Catalogue(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Rejected configuration values
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("invalid settings: {0}")]
    Invalid(&'static str),
    #[error("failed to parse settings: {0}")]
    Parse(String),
    #[error("failed to read settings file {path}: {reason}")]
    Io { path: String, reason: String },
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err.to_string())
    }
}
