//! Engine-level error type.

use thiserror::Error;

use fxmark_mc::error::ConfigError;
use fxmark_mc::McError;
use fxmark_models::error::ModelError;
use fxmark_models::instruments::InstrumentError;

/// Errors surfaced by the valuation engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Instrument could not be resolved against the market snapshot.
    #[error(transparent)]
    Instrument(#[from] InstrumentError),
    /// Analytical model rejected its inputs.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// Monte Carlo engine rejected its inputs.
    #[error(transparent)]
    MonteCarlo(#[from] McError),
    /// Monte Carlo configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
