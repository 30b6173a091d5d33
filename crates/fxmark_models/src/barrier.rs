//! Single and double barrier option pricing.
//!
//! # Single barriers
//!
//! Reflection-principle closed form in the Garman-Kohlhagen setting.
//! With `mu = rd - rf - sigma^2/2` and `lambda = (mu + sigma^2/2) / sigma^2`,
//! the knock-out price for a call with the barrier at or below the strike
//! (down-and-out) is assembled from three components evaluated at the
//! shifted arguments `x1`, `y1`, `y`:
//!
//! ```text
//! A = S e^(-rf T) N(x1) - K e^(-rd T) N(x1 - sigma sqrt(T))
//! B = S e^(-rf T) N(y1) - K e^(-rd T) N(y1 - sigma sqrt(T))
//! C = S e^(-rf T) (H/S)^(2 lambda) N(y) - K e^(-rd T) (H/S)^(2 lambda - 2) N(y - sigma sqrt(T))
//! knock-out = A - B - C,   knock-in = vanilla - knock-out
//! ```
//!
//! Puts with the barrier at or above the strike (up-and-out) use the
//! mirrored components. When the barrier sits on the other side of the
//! strike the closed form degenerates; the engine then falls back to the
//! documented simplified approximation: the knock-out is worth the
//! discounted rebate only, the knock-in the full vanilla less the
//! discounted rebate. That branch is approximate and is flagged as such.
//!
//! The result is always floored at zero after the discounted rebate is
//! applied, and knock-in + knock-out = vanilla holds on the exact branch.
//!
//! # Double barriers
//!
//! No exact closed form is carried. The price is the vanilla value scaled
//! by a range-width factor: corridor log-width measured against a
//! four-sigma terminal move, clamped to [0, 1]. Knock-out takes
//! `vanilla * factor` while spot is inside the corridor, knock-in the
//! complement, so in + out = vanilla by construction. A pending followup
//! is to replace this with the Ikeda-Kunitomo series.

use num_traits::Float;

use crate::instruments::{KnockType, OptionType};
use crate::math::{norm_cdf, VOL_FLOOR};
use crate::vanilla::{GarmanKohlhagen, GkParams};

/// Inputs to the single-barrier pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierParams<T: Float> {
    /// Spot exchange rate.
    pub spot: T,
    /// Strike.
    pub strike: T,
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
    /// Call or put.
    pub option_type: OptionType,
    /// Knock-in or knock-out.
    pub knock: KnockType,
    /// Rebate paid when a knock-out extinguishes (or a knock-in never
    /// activates).
    pub rebate: T,
}

/// Terminal payoff logic shared by the `T <= 0` and zero-volatility
/// regimes: decide the barrier state at the current spot, then pay the
/// rebate or the (possibly deterministic) vanilla value.
fn terminal_value<T: Float>(params: &BarrierParams<T>, vanilla: T) -> T {
    // Barrier side follows the natural knock direction: calls knock on
    // the way down, puts on the way up.
    let touched = match params.option_type {
        OptionType::Call => params.spot <= params.barrier,
        OptionType::Put => params.spot >= params.barrier,
    };
    let dead = match params.knock {
        KnockType::Out => touched,
        KnockType::In => !touched,
    };
    if dead {
        params.rebate
    } else {
        vanilla
    }
}

/// Prices a single-barrier knock-in/knock-out option per unit notional.
///
/// At `T <= 0` the barrier state is evaluated at the terminal spot and
/// the result is the rebate (dead) or the intrinsic value (alive). At
/// zero volatility the same terminal logic applies against the
/// deterministic vanilla value. A spot already through the barrier at a
/// live expiry settles the knock state immediately: the knock-out pays
/// the discounted rebate, the knock-in becomes the vanilla.
pub fn barrier_price<T: Float>(params: &BarrierParams<T>) -> T {
    let zero = T::zero();
    let two = T::from(2.0).unwrap();
    let vol_floor = T::from(VOL_FLOOR).unwrap();

    let s = params.spot;
    let k = params.strike;
    let h = params.barrier;
    let rd = params.rate_domestic;
    let rf = params.rate_foreign;
    let vol = params.volatility;
    let t = params.expiry;

    let vanilla = vanilla_value(params);
    if t <= zero {
        return terminal_value(params, vanilla);
    }
    if vol <= vol_floor {
        return terminal_value(params, vanilla);
    }

    // Already-breached barrier at a live expiry: the knock-out is dead
    // and pays only the discounted rebate, the knock-in is active and
    // worth the vanilla outright.
    let touched = match params.option_type {
        OptionType::Call => s <= h,
        OptionType::Put => s >= h,
    };
    if touched {
        return match params.knock {
            KnockType::Out => params.rebate * (-rd * t).exp(),
            KnockType::In => vanilla,
        };
    }

    let sqrt_t = t.sqrt();
    let vol_sqrt_t = vol * sqrt_t;
    let df_domestic = (-rd * t).exp();
    let df_foreign = (-rf * t).exp();
    let discounted_rebate = params.rebate * df_domestic;

    let vol_sq = vol * vol;
    let half = T::from(0.5).unwrap();
    let mu = rd - rf - half * vol_sq;
    let lambda = (mu + half * vol_sq) / vol_sq;

    let y = (h * h / (s * k)).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
    let x1 = (s / k).ln() / vol_sqrt_t + lambda * vol_sqrt_t;
    let y1 = (h / s).ln() / vol_sqrt_t + lambda * vol_sqrt_t;

    let h_s = h / s;
    let pow_2l = h_s.powf(two * lambda);
    let pow_2l_m2 = h_s.powf(two * lambda - two);

    let price = match params.option_type {
        OptionType::Call => {
            if h <= k {
                // Down-and-out call: exact reflection composition.
                let a = s * df_foreign * norm_cdf(x1)
                    - k * df_domestic * norm_cdf(x1 - vol_sqrt_t);
                let b = s * df_foreign * norm_cdf(y1)
                    - k * df_domestic * norm_cdf(y1 - vol_sqrt_t);
                let c = s * df_foreign * pow_2l * norm_cdf(y)
                    - k * df_domestic * pow_2l_m2 * norm_cdf(y - vol_sqrt_t);
                let out = a - b - c;
                match params.knock {
                    KnockType::Out => out + discounted_rebate,
                    KnockType::In => vanilla - out - discounted_rebate,
                }
            } else {
                // Barrier above the strike: degenerate side, simplified
                // approximation (knock-out worth rebate only).
                match params.knock {
                    KnockType::Out => discounted_rebate,
                    KnockType::In => vanilla - discounted_rebate,
                }
            }
        }
        OptionType::Put => {
            if h >= k {
                // Up-and-out put: mirrored composition.
                let a = k * df_domestic * norm_cdf(-x1 + vol_sqrt_t)
                    - s * df_foreign * norm_cdf(-x1);
                let b = k * df_domestic * norm_cdf(-y1 + vol_sqrt_t)
                    - s * df_foreign * norm_cdf(-y1);
                let c = k * df_domestic * pow_2l_m2 * norm_cdf(-y + vol_sqrt_t)
                    - s * df_foreign * pow_2l * norm_cdf(-y);
                let out = a - b - c;
                match params.knock {
                    KnockType::Out => out + discounted_rebate,
                    KnockType::In => vanilla - out - discounted_rebate,
                }
            } else {
                // Barrier below the strike: degenerate side, simplified.
                match params.knock {
                    KnockType::Out => discounted_rebate,
                    KnockType::In => vanilla - discounted_rebate,
                }
            }
        }
    };

    price.max(zero)
}

/// Vanilla value under the same parameters (degenerate-regime aware).
fn vanilla_value<T: Float>(params: &BarrierParams<T>) -> T {
    match GkParams::new(
        params.spot,
        params.strike,
        params.rate_domestic,
        params.rate_foreign,
        params.volatility,
        params.expiry,
    ) {
        Ok(gk) => GarmanKohlhagen::new(gk).price(params.option_type),
        // Degenerate inputs that slipped past resolution price as worthless
        Err(_) => T::zero(),
    }
}

/// Inputs to the double-barrier pricer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleBarrierParams<T: Float> {
    /// Spot exchange rate.
    pub spot: T,
    /// Strike.
    pub strike: T,
    /// Lower barrier (strictly below `upper`).
    pub lower: T,
    /// Upper barrier.
    pub upper: T,
    /// Domestic risk-free rate.
    pub rate_domestic: T,
    /// Foreign risk-free rate.
    pub rate_foreign: T,
    /// Annualised volatility.
    pub volatility: T,
    /// Time to expiry in years.
    pub expiry: T,
    /// Call or put.
    pub option_type: OptionType,
    /// Knock-in or knock-out.
    pub knock: KnockType,
    /// Rebate on extinguishment.
    pub rebate: T,
}

/// Prices a double-barrier knock-in/knock-out option per unit notional.
///
/// Approximation: the survival weight of the corridor is its relative
/// width measured against a four-sigma terminal move,
/// `factor = clamp((U - L) / (S * 4 sigma sqrt(T)), 0, 1)`. While spot
/// is inside the corridor the knock-out is worth `vanilla * factor` and
/// the knock-in the complement; once outside, the knock-out is worth the
/// discounted rebate and the knock-in the full vanilla. In + out =
/// vanilla inside the corridor by construction.
pub fn double_barrier_price<T: Float>(params: &DoubleBarrierParams<T>) -> T {
    let zero = T::zero();
    let one = T::one();
    let vol_floor = T::from(VOL_FLOOR).unwrap();

    let s = params.spot;
    let t = params.expiry;
    let inside = s > params.lower && s < params.upper;

    let vanilla = vanilla_value(&BarrierParams {
        spot: params.spot,
        strike: params.strike,
        barrier: params.lower,
        rate_domestic: params.rate_domestic,
        rate_foreign: params.rate_foreign,
        volatility: params.volatility,
        expiry: params.expiry,
        option_type: params.option_type,
        knock: params.knock,
        rebate: params.rebate,
    });

    if t <= zero {
        let dead = match params.knock {
            KnockType::Out => !inside,
            KnockType::In => inside,
        };
        return if dead { params.rebate } else { vanilla };
    }

    let df_domestic = (-params.rate_domestic * t).exp();
    let discounted_rebate = params.rebate * df_domestic;

    if !inside {
        // Corridor already breached: a knock-out is dead, a knock-in is
        // the vanilla outright.
        return match params.knock {
            KnockType::Out => discounted_rebate,
            KnockType::In => vanilla,
        };
    }

    let four = T::from(4.0).unwrap();
    let vol_sqrt_t = params.volatility * t.sqrt();
    let factor = if vol_sqrt_t <= vol_floor {
        // Deterministic spot cannot reach either barrier within the model
        one
    } else {
        let width = (params.upper - params.lower) / s;
        (width / (four * vol_sqrt_t)).min(one).max(zero)
    };

    let price = match params.knock {
        KnockType::Out => vanilla * factor,
        KnockType::In => vanilla * (one - factor),
    };
    price.max(zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn base_call(knock: KnockType, barrier: f64) -> BarrierParams<f64> {
        BarrierParams {
            spot: 1.10,
            strike: 1.10,
            barrier,
            rate_domestic: 0.02,
            rate_foreign: 0.005,
            volatility: 0.12,
            expiry: 1.0,
            option_type: OptionType::Call,
            knock,
            rebate: 0.0,
        }
    }

    fn vanilla_of(params: &BarrierParams<f64>) -> f64 {
        GarmanKohlhagen::new(
            GkParams::new(
                params.spot,
                params.strike,
                params.rate_domestic,
                params.rate_foreign,
                params.volatility,
                params.expiry,
            )
            .unwrap(),
        )
        .price(params.option_type)
    }

    #[test]
    fn test_down_out_call_below_vanilla() {
        let ko = base_call(KnockType::Out, 1.00);
        let price = barrier_price(&ko);
        assert!(price > 0.0);
        assert!(price < vanilla_of(&ko));
    }

    #[test]
    fn test_in_out_parity_exact_branch() {
        // Down-barrier call: barrier below strike, exact composition
        for barrier in [0.95, 1.00, 1.05] {
            let ko = base_call(KnockType::Out, barrier);
            let ki = base_call(KnockType::In, barrier);
            let total = barrier_price(&ko) + barrier_price(&ki);
            assert_relative_eq!(total, vanilla_of(&ko), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_in_out_parity_put_exact_branch() {
        for barrier in [1.15, 1.20, 1.30] {
            let mut ko = base_call(KnockType::Out, barrier);
            ko.option_type = OptionType::Put;
            let mut ki = ko;
            ki.knock = KnockType::In;
            let total = barrier_price(&ko) + barrier_price(&ki);
            assert_relative_eq!(total, vanilla_of(&ko), epsilon = 1e-8);
        }
    }

    #[test]
    fn test_wrong_side_fallback() {
        // Barrier above the strike for a call: documented approximation
        let ko = base_call(KnockType::Out, 1.20);
        assert_eq!(barrier_price(&ko), 0.0);
        let ki = base_call(KnockType::In, 1.20);
        assert_relative_eq!(barrier_price(&ki), vanilla_of(&ki), epsilon = 1e-12);
    }

    #[test]
    fn test_closer_barrier_cheapens_knock_out() {
        let far = barrier_price(&base_call(KnockType::Out, 0.95));
        let close = barrier_price(&base_call(KnockType::Out, 1.08));
        assert!(far > close);
    }

    #[test]
    fn test_rebate_contribution() {
        let mut ko = base_call(KnockType::Out, 1.00);
        ko.rebate = 0.02;
        let without = barrier_price(&base_call(KnockType::Out, 1.00));
        let with = barrier_price(&ko);
        assert_relative_eq!(
            with - without,
            0.02 * (-0.02_f64).exp(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_breached_up_and_out_put_is_dead() {
        // Spot already through an upper barrier: the knock-out must not
        // price at its live closed-form value.
        let mut ko = base_call(KnockType::Out, 1.20);
        ko.option_type = OptionType::Put;
        ko.spot = 1.25;
        assert_eq!(barrier_price(&ko), 0.0);

        ko.rebate = 0.01;
        assert_relative_eq!(
            barrier_price(&ko),
            0.01 * (-0.02_f64).exp(),
            epsilon = 1e-12
        );

        let mut ki = ko;
        ki.knock = KnockType::In;
        // Knocked in already: full vanilla, no rebate
        assert_relative_eq!(barrier_price(&ki), vanilla_of(&ki), epsilon = 1e-12);
    }

    #[test]
    fn test_breached_down_and_out_call_is_dead() {
        let mut ko = base_call(KnockType::Out, 1.00);
        ko.spot = 0.95;
        ko.rebate = 0.01;
        assert_relative_eq!(
            barrier_price(&ko),
            0.01 * (-0.02_f64).exp(),
            epsilon = 1e-12
        );

        let mut ki = ko;
        ki.knock = KnockType::In;
        assert_relative_eq!(barrier_price(&ki), vanilla_of(&ki), epsilon = 1e-12);
    }

    #[test]
    fn test_expired_knocked_out_pays_rebate() {
        let mut ko = base_call(KnockType::Out, 1.15);
        ko.expiry = 0.0;
        ko.rebate = 0.01;
        // Call knocks on the way down: spot 1.10 <= barrier 1.15 is dead
        assert_eq!(barrier_price(&ko), 0.01);
    }

    #[test]
    fn test_expired_alive_pays_intrinsic() {
        let mut ko = base_call(KnockType::Out, 1.00);
        ko.expiry = 0.0;
        ko.strike = 1.05;
        // Alive at expiry: intrinsic max(0, 1.10 - 1.05)
        assert_relative_eq!(barrier_price(&ko), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_no_nan() {
        let mut ko = base_call(KnockType::Out, 1.00);
        ko.volatility = 0.0;
        let price = barrier_price(&ko);
        assert!(price.is_finite());
    }

    fn base_double(knock: KnockType) -> DoubleBarrierParams<f64> {
        DoubleBarrierParams {
            spot: 1.10,
            strike: 1.10,
            lower: 1.00,
            upper: 1.20,
            rate_domestic: 0.02,
            rate_foreign: 0.005,
            volatility: 0.12,
            expiry: 1.0,
            option_type: OptionType::Call,
            knock,
            rebate: 0.0,
        }
    }

    #[test]
    fn test_double_in_out_parity_inside() {
        let ko = base_double(KnockType::Out);
        let ki = base_double(KnockType::In);
        let vanilla = GarmanKohlhagen::new(
            GkParams::new(1.10, 1.10, 0.02, 0.005, 0.12, 1.0).unwrap(),
        )
        .price(OptionType::Call);
        assert_relative_eq!(
            double_barrier_price(&ko) + double_barrier_price(&ki),
            vanilla,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_double_knock_out_outside_pays_rebate() {
        let mut ko = base_double(KnockType::Out);
        ko.spot = 1.25;
        ko.rebate = 0.01;
        assert_relative_eq!(
            double_barrier_price(&ko),
            0.01 * (-0.02_f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_double_wider_corridor_raises_knock_out() {
        let narrow = base_double(KnockType::Out);
        let mut wide = narrow;
        wide.lower = 0.80;
        wide.upper = 1.40;
        assert!(double_barrier_price(&wide) > double_barrier_price(&narrow));
    }

    proptest! {
        #[test]
        fn prop_barrier_price_non_negative(
            spot in 0.8_f64..1.4,
            strike in 0.8_f64..1.4,
            barrier in 0.6_f64..1.6,
            vol in 0.01_f64..0.5,
            expiry in 0.0_f64..2.0,
            rebate in 0.0_f64..0.05,
        ) {
            for option_type in [OptionType::Call, OptionType::Put] {
                for knock in [KnockType::In, KnockType::Out] {
                    let p = barrier_price(&BarrierParams {
                        spot, strike, barrier,
                        rate_domestic: 0.02,
                        rate_foreign: 0.005,
                        volatility: vol,
                        expiry,
                        option_type,
                        knock,
                        rebate,
                    });
                    prop_assert!(p.is_finite());
                    prop_assert!(p >= 0.0);
                }
            }
        }
    }
}
