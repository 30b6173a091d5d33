//! Linear instruments: forwards and the simplified swap.

use num_traits::Float;

/// Per-unit value of an outright forward struck at `strike`.
///
/// `(S - K) e^(-rd T)`; at `T <= 0` the discount factor is 1 and the
/// value is the settlement difference.
#[inline]
pub fn forward_price<T: Float>(spot: T, strike: T, rate_domestic: T, expiry: T) -> T {
    (spot - strike) * (-rate_domestic * expiry.max(T::zero())).exp()
}

/// Per-unit value of the simplified single-period FX swap.
///
/// `(S - K) T e^(-rd T)`: the rate differential accrued over the
/// remaining life, discounted. A single-period approximation; a full
/// multi-leg swap schedule is out of scope.
#[inline]
pub fn swap_price<T: Float>(spot: T, strike: T, rate_domestic: T, expiry: T) -> T {
    let t = expiry.max(T::zero());
    (spot - strike) * t * (-rate_domestic * t).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_value() {
        let price = forward_price(1.08, 1.05, 0.02, 1.0);
        assert_relative_eq!(price, 0.03 * (-0.02_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_forward_at_expiry_is_settlement() {
        assert_relative_eq!(forward_price(1.08, 1.05, 0.02, 0.0), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_sign_agnostic_to_direction() {
        // Pricers quote from the buyer's side; a below-market strike is
        // simply negative value.
        assert!(forward_price(1.00, 1.05, 0.02, 1.0) < 0.0);
    }

    #[test]
    fn test_swap_scales_with_tenor() {
        let short = swap_price(1.08, 1.05, 0.02, 0.5);
        let long = swap_price(1.08, 1.05, 0.02, 2.0);
        assert!(long > short);
    }

    #[test]
    fn test_swap_worthless_at_expiry() {
        assert_eq!(swap_price(1.08, 1.05, 0.02, 0.0), 0.0);
    }
}
