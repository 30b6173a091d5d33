//! # fxmark_models: Analytical Pricers and the Instrument Data Model
//!
//! Middle layer of the fxmark workspace. Provides:
//! - Statistics primitives (`math`)
//! - Garman-Kohlhagen vanilla pricing and Greeks (`vanilla`)
//! - Single and double barrier pricing (`barrier`)
//! - One-touch / no-touch digitals (`touch`)
//! - Forward and swap valuation (`linear`)
//! - The closed instrument enumeration and its resolved form (`instruments`)
//!
//! ## Design Principles
//!
//! - **Tagged-union instruments**: barrier and payout fields exist only on
//!   the variants that need them.
//! - **Resolve once**: percentage quotes become outrights in a single
//!   place; every pricer consumes absolute levels.
//! - **No NaN**: zero expiry and zero volatility are explicit terminal /
//!   deterministic branches, never division by zero.
//! - Math is generic over `num_traits::Float`, following the workspace
//!   convention that keeps formulas AD-ready.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod barrier;
pub mod error;
pub mod instruments;
pub mod linear;
pub mod math;
pub mod touch;
pub mod vanilla;
