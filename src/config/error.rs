//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Tracing initialization failed: {0}")]
    TracingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Epsilon warning threshold must be a positive number, got {0}")]
    InvalidEpsilonWarningThreshold(f64),

    #[error("max_delta must be in (0, 1], got {0}")]
    InvalidMaxDelta(f64),

    #[error("Delta warning threshold must be a positive number, got {0}")]
    InvalidDeltaWarningThreshold(f64),

    #[error("Delta warning threshold ({threshold}) exceeds max_delta ({max_delta})")]
    DeltaWarningAboveMax { threshold: f64, max_delta: f64 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogFilter(String),
}
