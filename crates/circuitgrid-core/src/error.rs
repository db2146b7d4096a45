//! Error types shared across the circuitgrid crates.

use thiserror::Error;

/// Errors raised by the grid subsystem.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// The host element could not provide a 2D drawing context.
    #[error("Initialization failed: {0}")]
    Initialization(String),
    /// Grid spacing or major interval would make enumeration diverge.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Options document could not be parsed.
    #[error("Invalid options: {0}")]
    Options(String),
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Options(err.to_string())
    }
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
