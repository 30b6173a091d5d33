//! Canonical resolved form of an instrument.
//!
//! [`Instrument::resolve`] is the single place where percentage quotes
//! become outright levels and where market-wide inputs are merged with
//! per-instrument overrides. Everything downstream (dispatch, MTM,
//! Greeks) consumes the resolved form only, so the percentage/absolute
//! convention cannot diverge between call sites.

use fxmark_core::market_data::MarketData;
use fxmark_core::types::{time_to_expiry, Date};

use super::{
    BinaryStyle, Instrument, InstrumentError, InstrumentKind, KnockType, OptionType, TouchType,
};

/// Instrument kind with every level resolved to an outright.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolvedKind {
    /// Outright forward.
    Forward,
    /// Simplified single-period swap.
    Swap,
    /// European vanilla option.
    Vanilla {
        /// Call or put.
        option_type: OptionType,
    },
    /// Single-barrier option.
    Barrier {
        /// Call or put.
        option_type: OptionType,
        /// Knock-in or knock-out.
        knock: KnockType,
        /// Outright barrier level.
        barrier: f64,
        /// Rebate amount (0 when none was quoted).
        rebate: f64,
    },
    /// Double-barrier option.
    DoubleBarrier {
        /// Call or put.
        option_type: OptionType,
        /// Knock-in or knock-out.
        knock: KnockType,
        /// Outright lower barrier.
        lower: f64,
        /// Outright upper barrier.
        upper: f64,
        /// Rebate amount (0 when none was quoted).
        rebate: f64,
    },
    /// One-touch / no-touch digital.
    Touch {
        /// Touch direction.
        touch: TouchType,
        /// Outright barrier level.
        barrier: f64,
        /// Payout per unit notional.
        payout: f64,
    },
    /// Double-touch / double-no-touch digital.
    DoubleTouch {
        /// Touch direction.
        touch: TouchType,
        /// Outright lower barrier.
        lower: f64,
        /// Outright upper barrier.
        upper: f64,
        /// Payout per unit notional.
        payout: f64,
    },
    /// Range / outside binary.
    Binary {
        /// Corridor payoff style.
        style: BinaryStyle,
        /// Outright lower barrier.
        lower: f64,
        /// Outright upper barrier.
        upper: f64,
        /// Payout per unit notional.
        payout: f64,
    },
}

/// A fully resolved, validated pricing request.
///
/// All levels are outrights, all market inputs are merged, and the time
/// to expiry is already floored at zero. This is the only input type the
/// pricers accept.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResolvedInstrument {
    /// EUR/XXX spot rate.
    pub spot: f64,
    /// Outright strike (or contracted rate for linear kinds).
    pub strike: f64,
    /// Time to expiry in years, ACT/365, never negative.
    pub expiry: f64,
    /// Domestic (EUR) rate after override resolution.
    pub rate_domestic: f64,
    /// Foreign rate from the snapshot.
    pub rate_foreign: f64,
    /// Volatility after override resolution.
    pub volatility: f64,
    /// Signed notional.
    pub amount: f64,
    /// Premium paid (0 when none was quoted).
    pub premium: f64,
    /// Kind with outright levels.
    pub kind: ResolvedKind,
}

fn positive_level(name: &'static str, value: f64) -> Result<f64, InstrumentError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InstrumentError::NonPositiveLevel { name, value })
    }
}

fn ordered_corridor(lower: f64, upper: f64) -> Result<(f64, f64), InstrumentError> {
    if lower < upper {
        Ok((lower, upper))
    } else {
        Err(InstrumentError::BarrierOrder { lower, upper })
    }
}

impl Instrument {
    /// Resolves this instrument against a market snapshot.
    ///
    /// Merges per-instrument overrides (`volatility_override`,
    /// `rate_override` take priority over the snapshot), converts
    /// percentage-quoted levels to outrights against the pair's spot, and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// - [`InstrumentError::MarketData`] if the snapshot has no spot for the pair
    /// - [`InstrumentError::NonPositiveSpot`] / [`InstrumentError::NonPositiveLevel`]
    ///   for degenerate levels
    /// - [`InstrumentError::NegativeVolatility`] for a negative vol
    /// - [`InstrumentError::BarrierOrder`] if a corridor is inverted
    pub fn resolve(
        &self,
        market: &MarketData,
        as_of: Date,
    ) -> Result<ResolvedInstrument, InstrumentError> {
        let spot = market.spot(self.currency)?;
        if spot <= 0.0 {
            return Err(InstrumentError::NonPositiveSpot {
                spot,
                pair: self.currency.pair_code().to_string(),
            });
        }

        let volatility = self
            .volatility_override
            .unwrap_or_else(|| market.volatility(self.currency));
        if volatility < 0.0 {
            return Err(InstrumentError::NegativeVolatility(volatility));
        }

        let rate_domestic = self.rate_override.unwrap_or(market.risk_free_rate);
        let strike = positive_level("strike", self.strike.resolve(spot))?;

        let kind = match self.kind {
            InstrumentKind::Forward => ResolvedKind::Forward,
            InstrumentKind::Swap => ResolvedKind::Swap,
            InstrumentKind::Vanilla { option_type } => ResolvedKind::Vanilla { option_type },
            InstrumentKind::Barrier {
                option_type,
                knock,
                barrier,
                rebate,
            } => ResolvedKind::Barrier {
                option_type,
                knock,
                barrier: positive_level("barrier", barrier.resolve(spot))?,
                rebate: rebate.unwrap_or(0.0),
            },
            InstrumentKind::DoubleBarrier {
                option_type,
                knock,
                lower,
                upper,
                rebate,
            } => {
                let (lower, upper) = ordered_corridor(
                    positive_level("lower barrier", lower.resolve(spot))?,
                    positive_level("upper barrier", upper.resolve(spot))?,
                )?;
                ResolvedKind::DoubleBarrier {
                    option_type,
                    knock,
                    lower,
                    upper,
                    rebate: rebate.unwrap_or(0.0),
                }
            }
            InstrumentKind::Touch {
                touch,
                barrier,
                payout,
            } => ResolvedKind::Touch {
                touch,
                barrier: positive_level("barrier", barrier.resolve(spot))?,
                payout,
            },
            InstrumentKind::DoubleTouch {
                touch,
                lower,
                upper,
                payout,
            } => {
                let (lower, upper) = ordered_corridor(
                    positive_level("lower barrier", lower.resolve(spot))?,
                    positive_level("upper barrier", upper.resolve(spot))?,
                )?;
                ResolvedKind::DoubleTouch {
                    touch,
                    lower,
                    upper,
                    payout,
                }
            }
            InstrumentKind::Binary {
                style,
                lower,
                upper,
                payout,
            } => {
                let (lower, upper) = ordered_corridor(
                    positive_level("lower barrier", lower.resolve(spot))?,
                    positive_level("upper barrier", upper.resolve(spot))?,
                )?;
                ResolvedKind::Binary {
                    style,
                    lower,
                    upper,
                    payout,
                }
            }
        };

        Ok(ResolvedInstrument {
            spot,
            strike,
            expiry: time_to_expiry(self.maturity, as_of),
            rate_domestic,
            rate_foreign: market.foreign_rate,
            volatility,
            amount: self.amount,
            premium: self.premium.unwrap_or(0.0),
            kind,
        })
    }
}
