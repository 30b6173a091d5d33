//! Valuation engine for EUR-quoted FX derivative positions.
//!
//! Ties the analytical pricers and the Monte Carlo engine together
//! behind three operations:
//!
//! - [`theoretical_price`]: per-unit fair value of any supported
//!   instrument, routed through an exhaustive dispatch on the product
//!   kind;
//! - [`mark_to_market`]: position value, per-unit price scaled by
//!   notional, net of premium for optionality products, signed for
//!   shorts;
//! - [`position_greeks`]: delta, gamma, vega and theta for vanilla
//!   positions, `None` for products without analytic sensitivities.
//!
//! All three resolve the instrument against a [`MarketData`] snapshot
//! first, so percentage-quoted levels and per-instrument overrides are
//! handled in exactly one place.
//!
//! [`MarketData`]: fxmark_core::market_data::MarketData

#![deny(missing_docs)]

pub mod dispatch;
pub mod error;
pub mod greeks;
pub mod mtm;

pub use dispatch::{
    theoretical_price, theoretical_price_with_config, theoretical_price_with_defaults,
};
pub use error::EngineError;
pub use greeks::{position_greeks, position_greeks_with_defaults, PositionGreeks};
pub use mtm::{mark_to_market, mark_to_market_with_config, mark_to_market_with_defaults};
