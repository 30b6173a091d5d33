//! Monte Carlo pricing engine for path-dependent FX digitals.
//!
//! Provides a seeded, reproducible simulation of geometric Brownian
//! motion under dual discounting and prices corridor digital payoffs
//! (range binaries, outside binaries, double touch and double no-touch)
//! with a standard-error estimate alongside each price. Path work is
//! parallelised with rayon; per-chunk seed derivation keeps results
//! deterministic for a fixed seed regardless of thread count.

#![deny(missing_docs)]

pub mod config;
pub mod digital;
pub mod error;
pub mod rng;

pub use config::MonteCarloConfig;
pub use digital::{digital_price, DigitalParams, DigitalPrice};
pub use error::McError;
