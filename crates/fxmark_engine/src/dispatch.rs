//! Instrument dispatch: one entry point routing every product type to
//! its pricer.
//!
//! The public functions resolve an [`Instrument`] against a market
//! snapshot and match exhaustively on the resolved kind. There is no
//! fallback arm: adding a product to [`ResolvedKind`] forces every
//! dispatch site to handle it at compile time, so an unpriced
//! instrument cannot silently value at zero.

use tracing::{debug, warn};

use fxmark_core::market_data::MarketData;
use fxmark_core::types::Date;
use fxmark_mc::config::MonteCarloConfig;
use fxmark_mc::digital::{digital_price, DigitalParams};
use fxmark_models::barrier::{
    barrier_price, double_barrier_price, BarrierParams, DoubleBarrierParams,
};
use fxmark_models::instruments::{
    BinaryStyle, Instrument, ResolvedInstrument, ResolvedKind, TouchType,
};
use fxmark_models::linear::{forward_price, swap_price};
use fxmark_models::touch::{touch_price, TouchParams};
use fxmark_models::vanilla::{GarmanKohlhagen, GkParams};

use crate::error::EngineError;

/// Prices an instrument against a market snapshot, per unit notional.
///
/// Monte Carlo products run with the default configuration. Use
/// [`theoretical_price_with_config`] to control path count and seed.
///
/// # Examples
///
/// ```
/// use fxmark_core::market_data::MarketData;
/// use fxmark_core::types::{Currency, Date};
/// use fxmark_engine::theoretical_price;
/// use fxmark_models::instruments::{Instrument, InstrumentKind, Level, OptionType};
///
/// let call = Instrument::new(
///     Currency::USD,
///     1_000_000.0,
///     Level::Absolute(1.10),
///     Date::from_ymd(2025, 1, 2).unwrap(),
///     InstrumentKind::Vanilla { option_type: OptionType::Call },
/// );
/// let as_of = Date::from_ymd(2024, 1, 2).unwrap();
/// let price = theoretical_price(&call, &MarketData::default(), as_of).unwrap();
/// assert!(price > 0.0);
/// ```
pub fn theoretical_price(
    instrument: &Instrument,
    market: &MarketData,
    as_of: Date,
) -> Result<f64, EngineError> {
    theoretical_price_with_config(instrument, market, as_of, &MonteCarloConfig::default())
}

/// Prices an instrument against the built-in default market snapshot.
pub fn theoretical_price_with_defaults(
    instrument: &Instrument,
    as_of: Date,
) -> Result<f64, EngineError> {
    theoretical_price(instrument, &MarketData::default(), as_of)
}

/// Prices an instrument with an explicit Monte Carlo configuration.
pub fn theoretical_price_with_config(
    instrument: &Instrument,
    market: &MarketData,
    as_of: Date,
    config: &MonteCarloConfig,
) -> Result<f64, EngineError> {
    let resolved = instrument.resolve(market, as_of)?;
    debug!(
        pair = instrument.currency.pair_code(),
        spot = resolved.spot,
        strike = resolved.strike,
        expiry = resolved.expiry,
        volatility = resolved.volatility,
        rate_domestic = resolved.rate_domestic,
        rate_foreign = resolved.rate_foreign,
        "pricing resolved instrument"
    );
    price_resolved(&resolved, config)
}

/// Prices an already-resolved instrument, per unit notional.
pub(crate) fn price_resolved(
    resolved: &ResolvedInstrument,
    config: &MonteCarloConfig,
) -> Result<f64, EngineError> {
    let price = match resolved.kind {
        ResolvedKind::Forward => forward_price(
            resolved.spot,
            resolved.strike,
            resolved.rate_domestic,
            resolved.expiry,
        ),
        ResolvedKind::Swap => swap_price(
            resolved.spot,
            resolved.strike,
            resolved.rate_domestic,
            resolved.expiry,
        ),
        ResolvedKind::Vanilla { option_type } => {
            let params = GkParams::new(
                resolved.spot,
                resolved.strike,
                resolved.rate_domestic,
                resolved.rate_foreign,
                resolved.volatility,
                resolved.expiry,
            )?;
            GarmanKohlhagen::new(params).price(option_type)
        }
        ResolvedKind::Barrier {
            option_type,
            knock,
            barrier,
            rebate,
        } => barrier_price(&BarrierParams {
            spot: resolved.spot,
            strike: resolved.strike,
            barrier,
            rate_domestic: resolved.rate_domestic,
            rate_foreign: resolved.rate_foreign,
            volatility: resolved.volatility,
            expiry: resolved.expiry,
            option_type,
            knock,
            rebate,
        }),
        ResolvedKind::DoubleBarrier {
            option_type,
            knock,
            lower,
            upper,
            rebate,
        } => {
            // Range-width approximation, not an exact closed form.
            warn!(
                lower,
                upper, "double-barrier priced with corridor-width approximation"
            );
            double_barrier_price(&DoubleBarrierParams {
                spot: resolved.spot,
                strike: resolved.strike,
                lower,
                upper,
                rate_domestic: resolved.rate_domestic,
                rate_foreign: resolved.rate_foreign,
                volatility: resolved.volatility,
                expiry: resolved.expiry,
                option_type,
                knock,
                rebate,
            })
        }
        ResolvedKind::Touch {
            touch,
            barrier,
            payout,
        } => touch_price(
            &TouchParams {
                spot: resolved.spot,
                barrier,
                rate_domestic: resolved.rate_domestic,
                rate_foreign: resolved.rate_foreign,
                volatility: resolved.volatility,
                expiry: resolved.expiry,
                payout,
            },
            touch,
        ),
        ResolvedKind::DoubleTouch {
            touch,
            lower,
            upper,
            payout,
        } => {
            // A double touch pays when the corridor is exited, a double
            // no-touch when it survives.
            let style = match touch {
                TouchType::OneTouch => BinaryStyle::Outside,
                TouchType::NoTouch => BinaryStyle::Range,
            };
            corridor_price(resolved, style, lower, upper, payout, config)?
        }
        ResolvedKind::Binary {
            style,
            lower,
            upper,
            payout,
        } => corridor_price(resolved, style, lower, upper, payout, config)?,
    };
    Ok(price)
}

fn corridor_price(
    resolved: &ResolvedInstrument,
    style: BinaryStyle,
    lower: f64,
    upper: f64,
    payout: f64,
    config: &MonteCarloConfig,
) -> Result<f64, EngineError> {
    let params = DigitalParams::new(
        resolved.spot,
        lower,
        upper,
        resolved.expiry,
        resolved.rate_domestic,
        resolved.rate_foreign,
        resolved.volatility,
        payout,
    )?;
    let result = digital_price(&params, style, config);
    debug!(
        price = result.price,
        std_error = result.std_error,
        n_paths = result.n_paths,
        "corridor simulation complete"
    );
    Ok(result.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxmark_core::types::Currency;
    use fxmark_models::instruments::{InstrumentKind, KnockType, Level, OptionType};

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 2).unwrap()
    }

    fn one_year_out() -> Date {
        Date::from_ymd(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_forward_dispatch() {
        let forward = Instrument::new(
            Currency::USD,
            1.0,
            Level::Absolute(1.05),
            one_year_out(),
            InstrumentKind::Forward,
        );
        let market = MarketData::default();
        let price = theoretical_price(&forward, &market, as_of()).unwrap();
        let expiry = 365.0 / 365.0;
        assert_relative_eq!(
            price,
            (1.0856 - 1.05) * (-0.02f64 * expiry).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_vanilla_matches_model() {
        let call = Instrument::new(
            Currency::USD,
            1.0,
            Level::Absolute(1.10),
            one_year_out(),
            InstrumentKind::Vanilla {
                option_type: OptionType::Call,
            },
        );
        let market = MarketData::default();
        let dispatched = theoretical_price(&call, &market, as_of()).unwrap();

        let params = GkParams::new(1.0856, 1.10, 0.02, 0.005, 0.12, 1.0).unwrap();
        let direct = GarmanKohlhagen::new(params).price(OptionType::Call);
        assert_relative_eq!(dispatched, direct, epsilon = 1e-12);
    }

    #[test]
    fn test_knock_in_out_parity_through_dispatch() {
        let market = MarketData::default();
        let barrier = |knock| {
            Instrument::new(
                Currency::USD,
                1.0,
                Level::Absolute(1.10),
                one_year_out(),
                InstrumentKind::Barrier {
                    option_type: OptionType::Call,
                    knock,
                    barrier: Level::Absolute(1.00),
                    rebate: None,
                },
            )
        };
        let ko = theoretical_price(&barrier(KnockType::Out), &market, as_of()).unwrap();
        let ki = theoretical_price(&barrier(KnockType::In), &market, as_of()).unwrap();

        let vanilla = Instrument::new(
            Currency::USD,
            1.0,
            Level::Absolute(1.10),
            one_year_out(),
            InstrumentKind::Vanilla {
                option_type: OptionType::Call,
            },
        );
        let v = theoretical_price(&vanilla, &market, as_of()).unwrap();
        assert_relative_eq!(ko + ki, v, epsilon = 1e-10);
    }

    #[test]
    fn test_double_touch_uses_seeded_mc() {
        let dnt = Instrument::new(
            Currency::USD,
            1.0,
            Level::Absolute(1.0856),
            one_year_out(),
            InstrumentKind::DoubleTouch {
                touch: TouchType::NoTouch,
                lower: Level::Absolute(0.90),
                upper: Level::Absolute(1.30),
                payout: 100.0,
            },
        );
        let market = MarketData::default();
        let config = MonteCarloConfig::new()
            .with_paths(5_000)
            .unwrap()
            .with_seed(42);
        let a = theoretical_price_with_config(&dnt, &market, as_of(), &config).unwrap();
        let b = theoretical_price_with_config(&dnt, &market, as_of(), &config).unwrap();
        assert_eq!(a, b);
        assert!(a > 0.0 && a <= 100.0);
    }

    #[test]
    fn test_missing_spot_is_an_error() {
        let market = MarketData::new(Default::default(), Default::default(), 0.02);
        let forward = Instrument::new(
            Currency::GBP,
            1.0,
            Level::Absolute(0.84),
            one_year_out(),
            InstrumentKind::Forward,
        );
        let err = theoretical_price(&forward, &market, as_of()).unwrap_err();
        assert!(matches!(err, EngineError::Instrument(_)));
    }
}
