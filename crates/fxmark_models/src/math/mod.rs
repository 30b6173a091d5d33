//! Statistics primitives shared by all pricing formulas.

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};

/// Volatility threshold below which every pricer switches to its
/// deterministic degenerate branch. Shared so the regime boundary
/// cannot drift between models.
pub const VOL_FLOOR: f64 = 1e-10;
