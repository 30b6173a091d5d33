//! Mark-to-market valuation of positions.

use tracing::debug;

use fxmark_core::market_data::MarketData;
use fxmark_core::types::Date;
use fxmark_mc::config::MonteCarloConfig;
use fxmark_models::instruments::Instrument;

use crate::dispatch::price_resolved;
use crate::error::EngineError;

/// Marks a position to market.
///
/// The per-unit theoretical price is scaled by the absolute notional.
/// For optionality products the premium paid is subtracted; linear
/// products (forwards, swaps) carry no premium. A negative `amount`
/// denotes a short position and negates the result once, so a short
/// option that has gained value marks negative for the holder of the
/// short.
///
/// # Examples
///
/// ```
/// use fxmark_core::market_data::MarketData;
/// use fxmark_core::types::{Currency, Date};
/// use fxmark_engine::mark_to_market;
/// use fxmark_models::instruments::{Instrument, InstrumentKind, Level};
///
/// let short_forward = Instrument::new(
///     Currency::USD,
///     -500_000.0,
///     Level::Absolute(1.05),
///     Date::from_ymd(2025, 1, 2).unwrap(),
///     InstrumentKind::Forward,
/// );
/// let as_of = Date::from_ymd(2024, 7, 1).unwrap();
/// let mtm = mark_to_market(&short_forward, &MarketData::default(), as_of).unwrap();
/// assert!(mtm < 0.0); // spot above the contracted rate hurts the short
/// ```
pub fn mark_to_market(
    instrument: &Instrument,
    market: &MarketData,
    as_of: Date,
) -> Result<f64, EngineError> {
    mark_to_market_with_config(instrument, market, as_of, &MonteCarloConfig::default())
}

/// Marks a position to market against the built-in default snapshot.
pub fn mark_to_market_with_defaults(
    instrument: &Instrument,
    as_of: Date,
) -> Result<f64, EngineError> {
    mark_to_market(instrument, &MarketData::default(), as_of)
}

/// Marks a position to market with an explicit Monte Carlo configuration.
pub fn mark_to_market_with_config(
    instrument: &Instrument,
    market: &MarketData,
    as_of: Date,
    config: &MonteCarloConfig,
) -> Result<f64, EngineError> {
    let resolved = instrument.resolve(market, as_of)?;
    let price_per_unit = price_resolved(&resolved, config)?;
    let gross = price_per_unit * resolved.amount.abs();
    let net = if instrument.kind.is_linear() {
        gross
    } else {
        gross - resolved.premium
    };
    let mtm = if resolved.amount < 0.0 { -net } else { net };
    debug!(
        pair = instrument.currency.pair_code(),
        price_per_unit,
        amount = resolved.amount,
        premium = resolved.premium,
        mtm,
        "mark-to-market"
    );
    Ok(mtm)
}
