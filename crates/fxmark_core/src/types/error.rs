//! Error types for the foundation layer.

use thiserror::Error;

/// Currency parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The currency code is not part of the supported set.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Date construction and parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Invalid date components (e.g. February 30th).
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component.
        year: i32,
        /// Month component (1-12).
        month: u32,
        /// Day component (1-31).
        day: u32,
    },

    /// Failed to parse an ISO 8601 date string.
    #[error("failed to parse date: {0}")]
    ParseError(String),
}

/// Market data lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketDataError {
    /// No spot rate is available for the requested pair.
    #[error("no spot rate for {0}")]
    MissingSpotRate(String),
}
