//! Standard normal distribution functions.
//!
//! Every closed-form pricer in this crate is built on these two
//! primitives. `norm_cdf` uses the Abramowitz & Stegun rational
//! approximation to the complementary error function (formula 7.1.26,
//! maximum absolute error 1.5e-7); reimplementations must keep this
//! approximation so that prices do not drift across revisions.
//!
//! Both functions are generic over `T: Float`, deterministic and free of
//! side effects.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz & Stegun 7.1.26.
///
/// Evaluated with Horner's method. For negative arguments uses the
/// reflection erfc(-x) = 2 - erfc(x).
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();

    // A&S 7.1.26 coefficients
    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let abs_x = x.abs();
    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        two - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) for X ~ N(0, 1) as `0.5 * erfc(-x / sqrt(2))`.
/// Accurate to ~1.5e-7 for all finite x; preserves the symmetry
/// `norm_cdf(-x) = 1 - norm_cdf(x)` and `norm_cdf(0) = 0.5`.
///
/// # Examples
///
/// ```
/// use fxmark_models::math::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// `phi(x) = exp(-x^2 / 2) / sqrt(2 * pi)`
///
/// # Examples
///
/// ```
/// use fxmark_models::math::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804014327).abs() < 1e-12);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}
