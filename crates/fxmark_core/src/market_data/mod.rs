//! Market data snapshots.
//!
//! A [`MarketData`] value is an immutable snapshot of the inputs a
//! valuation batch prices against: EUR-quoted spot rates, annualised
//! volatilities per pair, and the domestic (EUR) risk-free rate. The
//! engine never mutates a snapshot, so a single instance can be shared
//! across the instruments of one batch to guarantee consistent prices.
//!
//! [`MarketData::default`] is the one authoritative fallback table; it
//! makes the engine testable without a live feed.
//!
//! # Examples
//!
//! ```
//! use fxmark_core::market_data::MarketData;
//! use fxmark_core::types::Currency;
//!
//! let market = MarketData::default();
//! assert!((market.spot(Currency::USD).unwrap() - 1.0856).abs() < 1e-12);
//! assert!((market.volatility(Currency::GBP) - 0.10).abs() < 1e-12);
//! assert!((market.risk_free_rate - 0.02).abs() < 1e-12);
//! ```

use std::collections::HashMap;

use crate::types::error::MarketDataError;
use crate::types::Currency;

/// Default domestic (EUR) risk-free rate: 2%.
pub const DEFAULT_DOMESTIC_RATE: f64 = 0.02;

/// Flat foreign risk-free rate used for every pair: 0.5%.
///
/// A documented simplification: the engine carries no per-currency
/// foreign curve, so the foreign leg discounts at this single rate
/// unless the snapshot overrides it.
pub const DEFAULT_FOREIGN_RATE: f64 = 0.005;

/// Volatility assumed when a user-supplied snapshot has no quote for a pair.
pub const FALLBACK_VOLATILITY: f64 = 0.15;

/// Immutable snapshot of spot rates, volatilities and rates.
///
/// Spot rates are EUR/XXX outrights keyed by the foreign currency;
/// volatilities are annualised lognormal vols for the same pairs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketData {
    /// EUR/XXX spot rates keyed by foreign currency.
    pub spot_rates: HashMap<Currency, f64>,
    /// Annualised volatilities keyed by foreign currency.
    pub volatilities: HashMap<Currency, f64>,
    /// Domestic (EUR) risk-free rate, continuous compounding.
    pub risk_free_rate: f64,
    /// Flat foreign risk-free rate, continuous compounding.
    pub foreign_rate: f64,
}

impl MarketData {
    /// Creates a snapshot from explicit rate and volatility tables.
    pub fn new(
        spot_rates: HashMap<Currency, f64>,
        volatilities: HashMap<Currency, f64>,
        risk_free_rate: f64,
    ) -> Self {
        Self {
            spot_rates,
            volatilities,
            risk_free_rate,
            foreign_rate: DEFAULT_FOREIGN_RATE,
        }
    }

    /// Returns the EUR/XXX spot rate for the given foreign currency.
    ///
    /// # Errors
    ///
    /// Returns [`MarketDataError::MissingSpotRate`] if the snapshot has no
    /// quote for the pair. A missing spot is a hard error: pricing off an
    /// implicit `1.0` would silently misvalue the position.
    pub fn spot(&self, currency: Currency) -> Result<f64, MarketDataError> {
        self.spot_rates
            .get(&currency)
            .copied()
            .ok_or_else(|| MarketDataError::MissingSpotRate(currency.pair_code().to_string()))
    }

    /// Returns the annualised volatility for the given pair.
    ///
    /// Falls back to [`FALLBACK_VOLATILITY`] when the snapshot carries no
    /// quote, matching the behaviour of the upstream dashboard.
    pub fn volatility(&self, currency: Currency) -> f64 {
        self.volatilities
            .get(&currency)
            .copied()
            .unwrap_or(FALLBACK_VOLATILITY)
    }
}

impl Default for MarketData {
    /// The documented default snapshot.
    ///
    /// | Pair   | Spot   | Vol  |
    /// |--------|--------|------|
    /// | EURUSD | 1.0856 | 12%  |
    /// | EURGBP | 0.8434 | 10%  |
    /// | EURJPY | 161.85 | 15%  |
    /// | EURCHF | 0.9642 | 8%   |
    ///
    /// Domestic rate 2%, foreign rate 0.5%.
    fn default() -> Self {
        let spot_rates = HashMap::from([
            (Currency::USD, 1.0856),
            (Currency::GBP, 0.8434),
            (Currency::JPY, 161.85),
            (Currency::CHF, 0.9642),
        ]);
        let volatilities = HashMap::from([
            (Currency::USD, 0.12),
            (Currency::GBP, 0.10),
            (Currency::JPY, 0.15),
            (Currency::CHF, 0.08),
        ]);
        Self {
            spot_rates,
            volatilities,
            risk_free_rate: DEFAULT_DOMESTIC_RATE,
            foreign_rate: DEFAULT_FOREIGN_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_covers_all_pairs() {
        let market = MarketData::default();
        for ccy in Currency::all() {
            assert!(market.spot(ccy).is_ok(), "missing spot for {}", ccy);
            assert!(market.volatility(ccy) > 0.0);
        }
    }

    #[test]
    fn test_default_values() {
        let market = MarketData::default();
        assert_relative_eq!(market.spot(Currency::JPY).unwrap(), 161.85);
        assert_relative_eq!(market.volatility(Currency::CHF), 0.08);
        assert_relative_eq!(market.risk_free_rate, DEFAULT_DOMESTIC_RATE);
        assert_relative_eq!(market.foreign_rate, DEFAULT_FOREIGN_RATE);
    }

    #[test]
    fn test_missing_spot_is_error() {
        let market = MarketData::new(HashMap::new(), HashMap::new(), 0.02);
        let err = market.spot(Currency::USD).unwrap_err();
        assert_eq!(err, MarketDataError::MissingSpotRate("EURUSD".to_string()));
    }

    #[test]
    fn test_missing_volatility_falls_back() {
        let market = MarketData::new(HashMap::new(), HashMap::new(), 0.02);
        assert_relative_eq!(market.volatility(Currency::USD), FALLBACK_VOLATILITY);
    }
}
