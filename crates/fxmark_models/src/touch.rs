//! One-touch and no-touch digital pricing.
//!
//! The payout is fixed, paid at expiry, and conditional on the spot
//! trading through a barrier at any point before expiry. The default
//! hitting measure is the lambda form: with `mu = rd - rf - sigma^2/2`,
//! `lambda = sqrt(mu^2 + 2 rd sigma^2) / sigma` and `b = ln(B/S)`,
//!
//! ```text
//! z = b / (sigma sqrt(T)) + lambda sqrt(T)
//! p = (B/S)^((mu + lambda sigma)/sigma^2) N(eta z)
//!   + (B/S)^((mu - lambda sigma)/sigma^2) N(eta (z - 2 lambda sqrt(T)))
//! ```
//!
//! with `eta = -1` for a barrier above spot and `+1` below. Folding the
//! domestic rate into `lambda` weights each hitting path by the discount
//! to its hitting time, so `p` understates the raw first-passage
//! probability; it is the carried convention, kept as a named behavior.
//! One-touch value is `p * payout * e^(-rd T)`, no-touch the complement
//! `(1 - p) * payout * e^(-rd T)`.
//!
//! [`TouchMethod::FirstPassage`] selects the exact undiscounted
//! first-passage probability of the drifted barrier instead:
//!
//! ```text
//! B above spot:  p = N((mu T - b) / (sigma sqrt(T)))
//!                  + e^(2 mu b / sigma^2) N((-b - mu T) / (sigma sqrt(T)))
//! B below spot:  p = N((b - mu T) / (sigma sqrt(T)))
//!                  + e^(2 mu b / sigma^2) N((b + mu T) / (sigma sqrt(T)))
//! ```
//!
//! At `T <= 0` the terminal condition is evaluated directly; at zero
//! volatility the deterministic path `S e^((rd - rf) t)` decides whether
//! the barrier is reached. Both regimes apply to either method.

use num_traits::Float;

use crate::instruments::TouchType;
use crate::math::{norm_cdf, VOL_FLOOR};

/// Hitting measure used by the touch pricer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchMethod {
    /// Lambda form: hitting paths weighted by the domestic discount to
    /// their hitting time. The carried default.
    #[default]
    DiscountedHitting,
    /// Exact first-passage probability under the risk-neutral drift,
    /// with no hitting-time discount.
    FirstPassage,
}

/// Inputs to the touch pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchParams<T: Float> {
    /// Spot exchange rate.
    pub spot: T,
    /// Barrier level.
    pub barrier: T,
    /// Domestic risk-free rate.
    pub rate_domestic: T,
    /// Foreign risk-free rate.
    pub rate_foreign: T,
    /// Annualised volatility.
    pub volatility: T,
    /// Time to expiry in years.
    pub expiry: T,
    /// Fixed payout per unit notional, paid at expiry.
    pub payout: T,
}

/// Hitting measure of the barrier with the default method.
///
/// Returns a value in [0, 1]. Degenerate regimes:
/// - `T <= 0`: 1 when spot sits on or beyond the barrier, else 0;
/// - zero volatility: 1 when the deterministic forward path reaches the
///   barrier, else 0;
/// - barrier equal to spot: 1.
pub fn touch_probability<T: Float>(params: &TouchParams<T>) -> T {
    touch_probability_with_method(params, TouchMethod::default())
}

/// Hitting measure of the barrier with an explicit method.
pub fn touch_probability_with_method<T: Float>(
    params: &TouchParams<T>,
    method: TouchMethod,
) -> T {
    let zero = T::zero();
    let one = T::one();
    let vol_floor = T::from(VOL_FLOOR).unwrap();

    let s = params.spot;
    let barrier = params.barrier;
    let t = params.expiry;
    let vol = params.volatility;

    let above = barrier >= s;
    let reached_terminal = |terminal: T| {
        if above {
            terminal >= barrier
        } else {
            terminal <= barrier
        }
    };

    if t <= zero {
        return if reached_terminal(s) { one } else { zero };
    }
    if vol <= vol_floor {
        let terminal = s * ((params.rate_domestic - params.rate_foreign) * t).exp();
        return if reached_terminal(s) || reached_terminal(terminal) {
            one
        } else {
            zero
        };
    }

    let b = (barrier / s).ln();
    if b == zero {
        return one;
    }

    let p = match method {
        TouchMethod::DiscountedHitting => discounted_hitting(params, b),
        TouchMethod::FirstPassage => first_passage(params, b),
    };
    p.min(one).max(zero)
}

/// Lambda-form hitting measure for a live, non-degenerate barrier.
fn discounted_hitting<T: Float>(params: &TouchParams<T>, b: T) -> T {
    let one = T::one();
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();

    let vol = params.volatility;
    let vol_sq = vol * vol;
    let sqrt_t = params.expiry.sqrt();
    let mu = params.rate_domestic - params.rate_foreign - half * vol_sq;
    let lambda = (mu * mu + two * params.rate_domestic * vol_sq).sqrt() / vol;

    let eta = if b > T::zero() { -one } else { one };
    let z = b / (vol * sqrt_t) + lambda * sqrt_t;
    let barrier_ratio = params.barrier / params.spot;

    barrier_ratio.powf((mu + lambda * vol) / vol_sq) * norm_cdf(eta * z)
        + barrier_ratio.powf((mu - lambda * vol) / vol_sq)
            * norm_cdf(eta * (z - two * lambda * sqrt_t))
}

/// Exact first-passage probability for a live, non-degenerate barrier.
fn first_passage<T: Float>(params: &TouchParams<T>, b: T) -> T {
    let zero = T::zero();
    let half = T::from(0.5).unwrap();
    let two = T::from(2.0).unwrap();

    let t = params.expiry;
    let vol = params.volatility;
    let vol_sq = vol * vol;
    let mu = params.rate_domestic - params.rate_foreign - half * vol_sq;
    let vol_sqrt_t = vol * t.sqrt();
    let reflection = (two * mu * b / vol_sq).exp();

    if b > zero {
        norm_cdf((mu * t - b) / vol_sqrt_t) + reflection * norm_cdf((-b - mu * t) / vol_sqrt_t)
    } else {
        norm_cdf((b - mu * t) / vol_sqrt_t) + reflection * norm_cdf((b + mu * t) / vol_sqrt_t)
    }
}

/// Prices a one-touch or no-touch digital per unit notional.
pub fn touch_price<T: Float>(params: &TouchParams<T>, touch: TouchType) -> T {
    touch_price_with_method(params, touch, TouchMethod::default())
}

/// Prices a one-touch or no-touch digital with an explicit hitting
/// measure.
pub fn touch_price_with_method<T: Float>(
    params: &TouchParams<T>,
    touch: TouchType,
    method: TouchMethod,
) -> T {
    let p = touch_probability_with_method(params, method);
    let df_domestic = (-params.rate_domestic * params.expiry.max(T::zero())).exp();
    let probability = match touch {
        TouchType::OneTouch => p,
        TouchType::NoTouch => T::one() - p,
    };
    probability * params.payout * df_domestic
}
