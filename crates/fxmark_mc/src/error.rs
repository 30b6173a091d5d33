//! Error types for the Monte Carlo crate.

use thiserror::Error;

pub use crate::config::ConfigError;

/// Errors raised when building simulation inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum McError {
    /// Spot must be strictly positive.
    #[error("invalid spot price: {0}")]
    InvalidSpot(f64),
    /// Corridor barriers must satisfy 0 < lower < upper.
    #[error("invalid corridor: lower {lower} must be positive and below upper {upper}")]
    InvalidCorridor {
        /// Lower barrier supplied.
        lower: f64,
        /// Upper barrier supplied.
        upper: f64,
    },
    /// Volatility must be non-negative.
    #[error("invalid volatility: {0}")]
    InvalidVolatility(f64),
    /// Time to expiry must be non-negative.
    #[error("invalid time to expiry: {0}")]
    InvalidExpiry(f64),
    /// Payout must be non-negative.
    #[error("invalid payout: {0}")]
    InvalidPayout(f64),
    /// Engine configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
