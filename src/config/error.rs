//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("max_turns must be greater than zero")]
    ZeroMaxTurns,

    #[error("Success reward ({success}) must exceed failure reward ({failure})")]
    RewardOrdering { success: f64, failure: f64 },

    #[error("Exploration rate {0} is outside [0, 1]")]
    InvalidEpsilon(f64),

    #[error("Slot '{slot}' is listed twice in {list}")]
    DuplicateSlot { list: &'static str, slot: String },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
