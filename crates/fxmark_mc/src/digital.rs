//! Monte Carlo pricing for corridor digital options.
//!
//! Range binaries pay a fixed amount at expiry if spot never leaves the
//! corridor `(lower, upper)`; outside binaries pay if either barrier is
//! touched. Both are priced by simulating geometric Brownian motion
//! paths under the domestic-minus-foreign drift and monitoring the
//! corridor at every step. Double-touch and double-no-touch options map
//! onto the same engine: corridor exit pays a double touch, corridor
//! survival pays a double no-touch.

use rayon::prelude::*;

use fxmark_models::instruments::BinaryStyle;
use fxmark_models::math::VOL_FLOOR;

use crate::config::MonteCarloConfig;
use crate::error::McError;
use crate::rng::McRng;

/// Paths simulated per work unit. Each chunk draws from its own derived
/// RNG, so the estimate is independent of thread scheduling.
const CHUNK_PATHS: usize = 4096;

/// Validated inputs for a corridor digital simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalParams {
    /// Current spot rate.
    pub spot: f64,
    /// Lower corridor barrier.
    pub lower: f64,
    /// Upper corridor barrier.
    pub upper: f64,
    /// Time to expiry in years.
    pub expiry: f64,
    /// Domestic risk-free rate.
    pub rate_domestic: f64,
    /// Foreign risk-free rate.
    pub rate_foreign: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Fixed payout on the paying event.
    pub payout: f64,
}

impl DigitalParams {
    /// Validates and constructs simulation parameters.
    ///
    /// Requires a positive spot, an ordered positive corridor,
    /// non-negative volatility, expiry and payout.
    pub fn new(
        spot: f64,
        lower: f64,
        upper: f64,
        expiry: f64,
        rate_domestic: f64,
        rate_foreign: f64,
        volatility: f64,
        payout: f64,
    ) -> Result<Self, McError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(McError::InvalidSpot(spot));
        }
        if !(lower > 0.0 && lower < upper) {
            return Err(McError::InvalidCorridor { lower, upper });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(McError::InvalidVolatility(volatility));
        }
        if !expiry.is_finite() || expiry < 0.0 {
            return Err(McError::InvalidExpiry(expiry));
        }
        if !payout.is_finite() || payout < 0.0 {
            return Err(McError::InvalidPayout(payout));
        }
        Ok(Self {
            spot,
            lower,
            upper,
            expiry,
            rate_domestic,
            rate_foreign,
            volatility,
            payout,
        })
    }

    #[inline]
    fn inside(&self, s: f64) -> bool {
        s > self.lower && s < self.upper
    }
}

/// Monte Carlo estimate with its sampling error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitalPrice {
    /// Discounted expected payoff.
    pub price: f64,
    /// Standard error of the estimate, in price units.
    pub std_error: f64,
    /// Number of paths behind the estimate (0 for closed-form branches).
    pub n_paths: usize,
}

impl DigitalPrice {
    fn exact(price: f64) -> Self {
        Self {
            price,
            std_error: 0.0,
            n_paths: 0,
        }
    }
}

/// Prices a range or outside binary.
///
/// At expiry the corridor is evaluated on the terminal spot alone. A
/// near-zero volatility collapses the simulation to the deterministic
/// forward path. Otherwise GBM paths are simulated with
/// `max(50, ⌊T·252⌋)` steps and the corridor checked after every step.
///
/// # Examples
///
/// ```
/// use fxmark_mc::config::MonteCarloConfig;
/// use fxmark_mc::digital::{digital_price, DigitalParams};
/// use fxmark_models::instruments::BinaryStyle;
///
/// let params = DigitalParams::new(1.10, 1.05, 1.15, 0.25, 0.02, 0.005, 0.10, 100.0).unwrap();
/// let config = MonteCarloConfig::new().with_seed(42);
/// let result = digital_price(&params, BinaryStyle::Range, &config);
/// assert!(result.price >= 0.0);
/// ```
pub fn digital_price(
    params: &DigitalParams,
    style: BinaryStyle,
    config: &MonteCarloConfig,
) -> DigitalPrice {
    let df = (-params.rate_domestic * params.expiry).exp();

    if params.expiry <= 0.0 {
        let pays = match style {
            BinaryStyle::Range => params.inside(params.spot),
            BinaryStyle::Outside => !params.inside(params.spot),
        };
        return DigitalPrice::exact(if pays { params.payout * df } else { 0.0 });
    }

    if params.volatility <= VOL_FLOOR {
        // Deterministic monotone path from spot to the forward; the
        // corridor survives iff both endpoints sit strictly inside.
        let terminal =
            params.spot * ((params.rate_domestic - params.rate_foreign) * params.expiry).exp();
        let survives = params.inside(params.spot) && params.inside(terminal);
        let pays = match style {
            BinaryStyle::Range => survives,
            BinaryStyle::Outside => !survives,
        };
        return DigitalPrice::exact(if pays { params.payout * df } else { 0.0 });
    }

    let n_paths = config.n_paths();
    let n_steps = config.steps_for_expiry(params.expiry);
    let dt = params.expiry / n_steps as f64;
    let drift = (params.rate_domestic - params.rate_foreign
        - 0.5 * params.volatility * params.volatility)
        * dt;
    let diffusion = params.volatility * dt.sqrt();

    let base = match config.seed() {
        Some(seed) => McRng::from_seed(seed),
        None => McRng::from_entropy(),
    };

    let n_chunks = n_paths.div_ceil(CHUNK_PATHS);
    let hits: u64 = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let paths_in_chunk = CHUNK_PATHS.min(n_paths - chunk * CHUNK_PATHS);
            let mut rng = base.child(chunk as u64);
            let mut chunk_hits = 0u64;
            for _ in 0..paths_in_chunk {
                if simulate_survival(params, n_steps, drift, diffusion, &mut rng) {
                    chunk_hits += 1;
                }
            }
            chunk_hits
        })
        .sum();

    let survived = hits as f64 / n_paths as f64;
    let p_pay = match style {
        BinaryStyle::Range => survived,
        BinaryStyle::Outside => 1.0 - survived,
    };
    let std_error = params.payout * df * (p_pay * (1.0 - p_pay) / n_paths as f64).sqrt();

    DigitalPrice {
        price: p_pay * params.payout * df,
        std_error,
        n_paths,
    }
}

/// Simulates one path, returning whether it stayed strictly inside the
/// corridor at every monitored step.
#[inline]
fn simulate_survival(
    params: &DigitalParams,
    n_steps: usize,
    drift: f64,
    diffusion: f64,
    rng: &mut McRng,
) -> bool {
    let mut spot = params.spot;
    for _ in 0..n_steps {
        spot *= (drift + diffusion * rng.normal()).exp();
        if !params.inside(spot) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_params() -> DigitalParams {
        DigitalParams::new(1.10, 1.00, 1.20, 0.25, 0.02, 0.005, 0.10, 100.0)
            .expect("valid params")
    }

    fn seeded(n_paths: usize) -> MonteCarloConfig {
        MonteCarloConfig::new()
            .with_paths(n_paths)
            .expect("valid path count")
            .with_seed(42)
    }

    #[test]
    fn test_invalid_corridor_rejected() {
        let err = DigitalParams::new(1.10, 1.20, 1.00, 0.25, 0.02, 0.005, 0.10, 100.0);
        assert!(matches!(err, Err(McError::InvalidCorridor { .. })));
    }

    #[test]
    fn test_terminal_range_inside_pays() {
        let params = DigitalParams::new(1.10, 1.00, 1.20, 0.0, 0.02, 0.005, 0.10, 100.0)
            .expect("valid params");
        let config = MonteCarloConfig::default();
        let range = digital_price(&params, BinaryStyle::Range, &config);
        assert_relative_eq!(range.price, 100.0, epsilon = 1e-12);
        let outside = digital_price(&params, BinaryStyle::Outside, &config);
        assert_relative_eq!(outside.price, 0.0);
    }

    #[test]
    fn test_terminal_outside_corridor() {
        let params = DigitalParams::new(1.25, 1.00, 1.20, 0.0, 0.02, 0.005, 0.10, 100.0)
            .expect("valid params");
        let config = MonteCarloConfig::default();
        assert_relative_eq!(
            digital_price(&params, BinaryStyle::Range, &config).price,
            0.0
        );
        assert_relative_eq!(
            digital_price(&params, BinaryStyle::Outside, &config).price,
            100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_vol_is_deterministic() {
        let params = DigitalParams::new(1.10, 1.00, 1.20, 1.0, 0.02, 0.005, 0.0, 100.0)
            .expect("valid params");
        let config = MonteCarloConfig::default();
        let result = digital_price(&params, BinaryStyle::Range, &config);
        // Forward 1.10·e^0.015 ≈ 1.1166 stays inside the corridor.
        assert_relative_eq!(result.price, 100.0 * (-0.02f64).exp(), epsilon = 1e-12);
        assert_eq!(result.n_paths, 0);
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let params = base_params();
        let config = seeded(10_000);
        let a = digital_price(&params, BinaryStyle::Range, &config);
        let b = digital_price(&params, BinaryStyle::Range, &config);
        assert_eq!(a.price, b.price);
        assert_eq!(a.std_error, b.std_error);
    }

    #[test]
    fn test_range_and_outside_are_complementary() {
        let params = base_params();
        let config = seeded(10_000);
        let range = digital_price(&params, BinaryStyle::Range, &config);
        let outside = digital_price(&params, BinaryStyle::Outside, &config);
        let df = (-params.rate_domestic * params.expiry).exp();
        assert_relative_eq!(
            range.price + outside.price,
            params.payout * df,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_wide_corridor_approaches_discounted_payout() {
        let params = DigitalParams::new(1.10, 0.50, 2.50, 0.25, 0.02, 0.005, 0.10, 100.0)
            .expect("valid params");
        let result = digital_price(&params, BinaryStyle::Range, &seeded(20_000));
        let df = (-0.02f64 * 0.25).exp();
        assert_relative_eq!(result.price, 100.0 * df, epsilon = 1e-6);
    }

    #[test]
    fn test_error_shrinks_with_more_paths() {
        let params = base_params();
        let coarse = digital_price(&params, BinaryStyle::Range, &seeded(1_000));
        let fine = digital_price(&params, BinaryStyle::Range, &seeded(64_000));
        assert!(fine.std_error < coarse.std_error);
        // Both estimates should agree within a few standard errors.
        let spread = (coarse.price - fine.price).abs();
        assert!(
            spread < 5.0 * (coarse.std_error + fine.std_error),
            "spread {} too wide",
            spread
        );
    }

    #[test]
    fn test_price_bounded_by_discounted_payout() {
        let params = base_params();
        let result = digital_price(&params, BinaryStyle::Range, &seeded(5_000));
        let df = (-params.rate_domestic * params.expiry).exp();
        assert!(result.price >= 0.0);
        assert!(result.price <= params.payout * df + 1e-12);
    }
}
