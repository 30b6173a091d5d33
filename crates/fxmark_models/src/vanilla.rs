//! Garman-Kohlhagen pricing for European FX vanillas.
//!
//! The standard FX extension of Black-Scholes with separate domestic and
//! foreign discount rates:
//!
//! ```text
//! d1   = [ln(S/K) + (rd - rf + sigma^2/2) T] / (sigma sqrt(T))
//! d2   = d1 - sigma sqrt(T)
//! Call = S e^(-rf T) N(d1) - K e^(-rd T) N(d2)
//! Put  = K e^(-rd T) N(-d2) - S e^(-rf T) N(-d1)
//! ```
//!
//! Two degenerate regimes are handled explicitly rather than through the
//! continuous-time formula:
//! - `T <= 0`: price collapses to intrinsic value, all Greeks to zero;
//! - `sigma ~ 0`: the spot evolves deterministically at the rate
//!   differential, so the price is the discounted forward payoff and
//!   gamma/vega vanish. Neither regime can produce NaN.
//!
//! # Examples
//!
//! ```
//! use fxmark_models::instruments::OptionType;
//! use fxmark_models::vanilla::{GarmanKohlhagen, GkParams};
//!
//! let params = GkParams::new(1.10, 1.12, 0.03, 0.01, 0.15, 1.0).unwrap();
//! let model = GarmanKohlhagen::new(params);
//!
//! let call = model.price(OptionType::Call);
//! let put = model.price(OptionType::Put);
//!
//! // Put-call parity: C - P = S e^(-rf T) - K e^(-rd T)
//! let parity = call - put
//!     - (1.10 * (-0.01_f64).exp() - 1.12 * (-0.03_f64).exp());
//! assert!(parity.abs() < 1e-10);
//! ```

use num_traits::Float;

use crate::error::ModelError;
use crate::instruments::OptionType;
use crate::math::{norm_cdf, norm_pdf, VOL_FLOOR};

/// Inputs to the Garman-Kohlhagen formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GkParams<T: Float> {
    /// Spot exchange rate (domestic per foreign).
    pub spot: T,
    /// Strike.
    pub strike: T,
    /// Domestic risk-free rate, continuous compounding.
    pub rate_domestic: T,
    /// Foreign risk-free rate, continuous compounding.
    pub rate_foreign: T,
    /// Annualised volatility (zero allowed).
    pub volatility: T,
    /// Time to expiry in years (zero allowed).
    pub expiry: T,
}

impl<T: Float> GkParams<T> {
    /// Creates validated parameters.
    ///
    /// # Errors
    ///
    /// Rejects non-positive spot or strike, negative volatility and
    /// negative expiry. Zero volatility and zero expiry are valid inputs
    /// with well-defined degenerate prices.
    pub fn new(
        spot: T,
        strike: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, ModelError> {
        if spot <= T::zero() {
            return Err(ModelError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if strike <= T::zero() {
            return Err(ModelError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if volatility < T::zero() {
            return Err(ModelError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        if expiry < T::zero() {
            return Err(ModelError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            strike,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    /// Forward rate `F = S e^((rd - rf) T)`.
    #[inline]
    pub fn forward(&self) -> T {
        self.spot * ((self.rate_domestic - self.rate_foreign) * self.expiry).exp()
    }
}

/// Garman-Kohlhagen model with pre-computed terms.
///
/// `new` caches d1, d2 and the two discount factors so the price and all
/// four Greeks can be read off the same instance.
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagen<T: Float> {
    params: GkParams<T>,
    d1: T,
    d2: T,
    sqrt_t: T,
    df_domestic: T,
    df_foreign: T,
    /// False in the expired or zero-volatility regimes, where d1/d2 are
    /// meaningless and the degenerate branches apply.
    regular: bool,
}

impl<T: Float> GarmanKohlhagen<T> {
    /// Builds the model, pre-computing d1/d2 and discount factors.
    pub fn new(params: GkParams<T>) -> Self {
        let zero = T::zero();
        let vol_floor = T::from(VOL_FLOOR).unwrap();
        let regular = params.expiry > zero && params.volatility > vol_floor;

        let sqrt_t = params.expiry.sqrt();
        let df_domestic = (-params.rate_domestic * params.expiry).exp();
        let df_foreign = (-params.rate_foreign * params.expiry).exp();

        let (d1, d2) = if regular {
            let vol_sqrt_t = params.volatility * sqrt_t;
            let half = T::from(0.5).unwrap();
            let drift = params.rate_domestic - params.rate_foreign
                + half * params.volatility * params.volatility;
            let d1 = ((params.spot / params.strike).ln() + drift * params.expiry) / vol_sqrt_t;
            (d1, d1 - vol_sqrt_t)
        } else {
            (zero, zero)
        };

        Self {
            params,
            d1,
            d2,
            sqrt_t,
            df_domestic,
            df_foreign,
            regular,
        }
    }

    /// Returns the parameters.
    #[inline]
    pub fn params(&self) -> &GkParams<T> {
        &self.params
    }

    /// Returns d1 (zero in the degenerate regimes).
    #[inline]
    pub fn d1(&self) -> T {
        self.d1
    }

    /// Returns d2 (zero in the degenerate regimes).
    #[inline]
    pub fn d2(&self) -> T {
        self.d2
    }

    /// True when expiry has passed (`T <= 0`).
    #[inline]
    fn expired(&self) -> bool {
        self.params.expiry <= T::zero()
    }

    /// Signed moneyness of the discounted forward payoff:
    /// `+(S df_f - K df_d)` for calls, negated for puts.
    #[inline]
    fn forward_intrinsic(&self, option_type: OptionType) -> T {
        let diff =
            self.params.spot * self.df_foreign - self.params.strike * self.df_domestic;
        match option_type {
            OptionType::Call => diff,
            OptionType::Put => -diff,
        }
    }

    /// Option price per unit of foreign notional.
    ///
    /// At `T <= 0` returns intrinsic value `max(0, +/-(S - K))`; at zero
    /// volatility returns the discounted deterministic payoff.
    pub fn price(&self, option_type: OptionType) -> T {
        let zero = T::zero();
        if self.expired() {
            let diff = self.params.spot - self.params.strike;
            return match option_type {
                OptionType::Call => diff.max(zero),
                OptionType::Put => (-diff).max(zero),
            };
        }
        if !self.regular {
            return self.forward_intrinsic(option_type).max(zero);
        }

        match option_type {
            OptionType::Call => {
                self.params.spot * self.df_foreign * norm_cdf(self.d1)
                    - self.params.strike * self.df_domestic * norm_cdf(self.d2)
            }
            OptionType::Put => {
                self.params.strike * self.df_domestic * norm_cdf(-self.d2)
                    - self.params.spot * self.df_foreign * norm_cdf(-self.d1)
            }
        }
    }

    /// Delta: sensitivity of the price to spot, per unit notional.
    ///
    /// `e^(-rf T) N(d1)` for calls, `e^(-rf T) (N(d1) - 1)` for puts.
    /// Zero at `T <= 0`; a discounted step function at zero volatility.
    pub fn delta(&self, option_type: OptionType) -> T {
        let zero = T::zero();
        if self.expired() {
            return zero;
        }
        if !self.regular {
            // Deterministic forward: delta is df_foreign on the strictly
            // ITM side; exactly at the money forward both sides read zero.
            let diff = self.forward_intrinsic(OptionType::Call);
            return match option_type {
                OptionType::Call => {
                    if diff > zero {
                        self.df_foreign
                    } else {
                        zero
                    }
                }
                OptionType::Put => {
                    if diff < zero {
                        -self.df_foreign
                    } else {
                        zero
                    }
                }
            };
        }

        let nd1 = norm_cdf(self.d1);
        match option_type {
            OptionType::Call => self.df_foreign * nd1,
            OptionType::Put => self.df_foreign * (nd1 - T::one()),
        }
    }

    /// Gamma: rate of change of delta, identical for calls and puts.
    ///
    /// Zero at `T <= 0` and at zero volatility.
    pub fn gamma(&self) -> T {
        if !self.regular {
            return T::zero();
        }
        self.df_foreign * norm_pdf(self.d1)
            / (self.params.spot * self.params.volatility * self.sqrt_t)
    }

    /// Vega per 1% volatility move, identical for calls and puts.
    ///
    /// Zero at `T <= 0` and at zero volatility.
    pub fn vega(&self) -> T {
        if !self.regular {
            return T::zero();
        }
        let hundred = T::from(100.0).unwrap();
        self.params.spot * self.df_foreign * norm_pdf(self.d1) * self.sqrt_t / hundred
    }

    /// Theta per calendar day.
    ///
    /// Sum of the volatility time-decay term and the two rate-drift
    /// terms, divided by 365. Zero in the degenerate regimes.
    pub fn theta(&self, option_type: OptionType) -> T {
        if !self.regular {
            return T::zero();
        }
        let two = T::from(2.0).unwrap();
        let days_per_year = T::from(365.0).unwrap();

        let decay = -self.params.spot * self.df_foreign * norm_pdf(self.d1)
            * self.params.volatility
            / (two * self.sqrt_t);

        match option_type {
            OptionType::Call => {
                let carry =
                    self.params.rate_foreign * self.params.spot * self.df_foreign * norm_cdf(self.d1);
                let funding = self.params.rate_domestic
                    * self.params.strike
                    * self.df_domestic
                    * norm_cdf(self.d2);
                (decay + carry - funding) / days_per_year
            }
            OptionType::Put => {
                let carry = self.params.rate_foreign
                    * self.params.spot
                    * self.df_foreign
                    * norm_cdf(-self.d1);
                let funding = self.params.rate_domestic
                    * self.params.strike
                    * self.df_domestic
                    * norm_cdf(-self.d2);
                (decay - carry + funding) / days_per_year
            }
        }
    }
}
