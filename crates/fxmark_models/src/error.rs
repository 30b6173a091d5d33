//! Error types for the analytical pricers.

use thiserror::Error;

/// Parameter validation errors for closed-form models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Spot must be strictly positive.
    #[error("invalid spot: {spot}")]
    InvalidSpot {
        /// Offending spot value.
        spot: f64,
    },

    /// Strike must be strictly positive.
    #[error("invalid strike: {strike}")]
    InvalidStrike {
        /// Offending strike value.
        strike: f64,
    },

    /// Volatility must not be negative (zero is allowed and priced as
    /// deterministic forward evolution).
    #[error("invalid volatility: {volatility}")]
    InvalidVolatility {
        /// Offending volatility value.
        volatility: f64,
    },

    /// Expiry must not be negative (zero is allowed and priced as the
    /// terminal payoff).
    #[error("invalid expiry: {expiry}")]
    InvalidExpiry {
        /// Offending expiry value.
        expiry: f64,
    },
}
