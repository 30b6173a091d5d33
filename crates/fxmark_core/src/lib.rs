//! # fxmark_core: Foundation Types for FX Valuation
//!
//! Bottom layer of the fxmark workspace. Provides:
//! - Currency and date types (`types`)
//! - Time-to-expiry under ACT/365, floored at zero (`types::time`)
//! - Market data snapshots with the documented default table (`market_data`)
//! - Structured error types (`types::error`)
//!
//! This crate has no dependency on the other fxmark crates and only
//! minimal external ones (chrono, thiserror, optional serde).
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialisation for `Currency`, `Date` and `MarketData`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
