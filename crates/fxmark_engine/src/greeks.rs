//! Position-level Greeks for vanilla options.

use tracing::debug;

use fxmark_core::market_data::MarketData;
use fxmark_core::types::Date;
use fxmark_models::instruments::{Instrument, ResolvedKind};
use fxmark_models::vanilla::{GarmanKohlhagen, GkParams};

use crate::error::EngineError;

/// First-order risk sensitivities of a position, scaled by its signed
/// notional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionGreeks {
    /// Change in value per unit move of spot.
    pub delta: f64,
    /// Change in delta per unit move of spot.
    pub gamma: f64,
    /// Change in value per one percentage point of volatility.
    pub vega: f64,
    /// Change in value per calendar day of decay.
    pub theta: f64,
}

/// Computes the Greeks of a position, if it has any.
///
/// Only European vanillas carry analytic Greeks here; every other kind
/// returns `Ok(None)` so callers can distinguish "no sensitivities" from
/// a valuation failure. An expired vanilla returns all-zero Greeks.
/// Per-unit sensitivities are scaled by the signed amount, so a short
/// call carries negative delta.
///
/// # Examples
///
/// ```
/// use fxmark_core::market_data::MarketData;
/// use fxmark_core::types::{Currency, Date};
/// use fxmark_engine::position_greeks;
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
/// let greeks = position_greeks(&call, &MarketData::default(), as_of)
///     .unwrap()
///     .expect("vanillas have Greeks");
/// assert!(greeks.delta > 0.0);
/// ```
pub fn position_greeks(
    instrument: &Instrument,
    market: &MarketData,
    as_of: Date,
) -> Result<Option<PositionGreeks>, EngineError> {
    let resolved = instrument.resolve(market, as_of)?;
    let option_type = match resolved.kind {
        ResolvedKind::Vanilla { option_type } => option_type,
        _ => return Ok(None),
    };

    if resolved.expiry <= 0.0 {
        return Ok(Some(PositionGreeks::default()));
    }

    let params = GkParams::new(
        resolved.spot,
        resolved.strike,
        resolved.rate_domestic,
        resolved.rate_foreign,
        resolved.volatility,
        resolved.expiry,
    )?;
    let model = GarmanKohlhagen::new(params);
    let greeks = PositionGreeks {
        delta: model.delta(option_type) * resolved.amount,
        gamma: model.gamma() * resolved.amount,
        vega: model.vega() * resolved.amount,
        theta: model.theta(option_type) * resolved.amount,
    };
    debug!(
        pair = instrument.currency.pair_code(),
        delta = greeks.delta,
        gamma = greeks.gamma,
        vega = greeks.vega,
        theta = greeks.theta,
        "position greeks"
    );
    Ok(Some(greeks))
}

/// Computes position Greeks against the built-in default market snapshot.
pub fn position_greeks_with_defaults(
    instrument: &Instrument,
    as_of: Date,
) -> Result<Option<PositionGreeks>, EngineError> {
    position_greeks(instrument, &MarketData::default(), as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fxmark_core::types::Currency;
    use fxmark_models::instruments::{InstrumentKind, Level, OptionType};

    fn as_of() -> Date {
        Date::from_ymd(2024, 1, 2).unwrap()
    }

    fn vanilla(amount: f64, option_type: OptionType) -> Instrument {
        Instrument::new(
            Currency::USD,
            amount,
            Level::Absolute(1.10),
            Date::from_ymd(2025, 1, 1).unwrap(),
            InstrumentKind::Vanilla { option_type },
        )
    }

    #[test]
    fn test_forward_has_no_greeks() {
        let forward = Instrument::new(
            Currency::USD,
            1.0,
            Level::Absolute(1.05),
            Date::from_ymd(2025, 1, 1).unwrap(),
            InstrumentKind::Forward,
        );
        let market = MarketData::default();
        assert_eq!(position_greeks(&forward, &market, as_of()).unwrap(), None);
    }

    #[test]
    fn test_expired_vanilla_zero_greeks() {
        let expired = Instrument::new(
            Currency::USD,
            1_000_000.0,
            Level::Absolute(1.05),
            Date::from_ymd(2023, 1, 1).unwrap(),
            InstrumentKind::Vanilla {
                option_type: OptionType::Call,
            },
        );
        let market = MarketData::default();
        let greeks = position_greeks(&expired, &market, as_of()).unwrap().unwrap();
        assert_eq!(greeks, PositionGreeks::default());
    }

    #[test]
    fn test_short_position_flips_sign() {
        let market = MarketData::default();
        let long = position_greeks(&vanilla(1_000_000.0, OptionType::Call), &market, as_of())
            .unwrap()
            .unwrap();
        let short = position_greeks(&vanilla(-1_000_000.0, OptionType::Call), &market, as_of())
            .unwrap()
            .unwrap();
        assert_relative_eq!(short.delta, -long.delta, epsilon = 1e-9);
        assert_relative_eq!(short.gamma, -long.gamma, epsilon = 1e-9);
        assert_relative_eq!(short.vega, -long.vega, epsilon = 1e-9);
        assert_relative_eq!(short.theta, -long.theta, epsilon = 1e-9);
        assert!(long.delta > 0.0);
        assert!(long.gamma > 0.0);
    }

    #[test]
    fn test_put_call_delta_relation() {
        // Call delta minus put delta equals the foreign discount factor,
        // scaled by the notional.
        let market = MarketData::default();
        let amount = 1.0;
        let call = position_greeks(&vanilla(amount, OptionType::Call), &market, as_of())
            .unwrap()
            .unwrap();
        let put = position_greeks(&vanilla(amount, OptionType::Put), &market, as_of())
            .unwrap()
            .unwrap();
        let df_foreign = (-0.005f64 * 1.0).exp();
        assert_relative_eq!(call.delta - put.delta, df_foreign, epsilon = 1e-9);
        // Gamma and vega are identical for calls and puts
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
    }
}
