//! Error types for carbutler

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("New mileage ({requested}) must not be lower than current mileage ({current})")]
    MileageDecrease { current: u32, requested: u32 },

    #[error("{0} is not currently due for this vehicle")]
    ServiceNotDue(String),

    #[error("Date not available for scheduling: {0}")]
    InvalidDate(String),

    #[error("Calendar error: {0}")]
    Calendar(String),

    #[error("Email error: {0}")]
    Email(String),

    #[error("OBD2 reader error: {0}")]
    Sensor(String),
}

pub type Result<T> = std::result::Result<T, Error>;
