//! Instrument records.
//!
//! An [`Instrument`] is an immutable position record as the dashboard
//! supplies it: a foreign currency, a signed notional, a strike quoted in
//! percentage or absolute terms, a maturity, and a kind. The kind is a
//! closed tagged union, so barrier levels, rebates and payouts exist only
//! on the variants that use them; an instrument with a missing barrier is
//! unrepresentable.
//!
//! Percentage-quoted levels are resolved against the spot exactly once,
//! by [`Instrument::resolve`], which produces the canonical
//! [`ResolvedInstrument`](resolved::ResolvedInstrument) every pricer
//! consumes. No pricer accepts a percentage-quoted value.

pub mod resolved;

pub use resolved::{ResolvedInstrument, ResolvedKind};

use fxmark_core::types::error::MarketDataError;
use fxmark_core::types::{Currency, Date};
use thiserror::Error;

/// Call or put.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy the foreign currency.
    Call,
    /// Right to sell the foreign currency.
    Put,
}

/// Barrier knock behaviour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KnockType {
    /// Option activates when the barrier trades.
    In,
    /// Option extinguishes when the barrier trades.
    Out,
}

/// Touch payoff direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TouchType {
    /// Pays if the barrier trades before expiry.
    OneTouch,
    /// Pays if the barrier never trades before expiry.
    NoTouch,
}

/// Corridor binary payoff style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryStyle {
    /// Pays if spot never leaves the corridor.
    Range,
    /// Pays if spot ever leaves the corridor.
    Outside,
}

/// A strike or barrier level as quoted.
///
/// Dashboards quote levels either as outrights or as a percentage of the
/// prevailing spot (100 = at-the-money-spot).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// An outright level, e.g. 1.0850 for EURUSD.
    Absolute(f64),
    /// Percentage of current spot; 105.0 means 105% of spot.
    Percentage(f64),
}

impl Level {
    /// Resolves the quoted level into an outright against the given spot.
    #[inline]
    pub fn resolve(&self, spot: f64) -> f64 {
        match *self {
            Level::Absolute(level) => level,
            Level::Percentage(pct) => spot * pct / 100.0,
        }
    }
}

/// The closed enumeration of instrument kinds the engine prices.
///
/// Covers the dashboard's full product list: linear forwards and swaps,
/// vanilla calls/puts, single and double knock-in/knock-out barriers,
/// one-touch/no-touch and their double-barrier variants, and
/// range/outside binaries.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstrumentKind {
    /// Outright forward on the strike rate.
    Forward,
    /// Simplified single-period FX swap.
    Swap,
    /// European vanilla option.
    Vanilla {
        /// Call or put.
        option_type: OptionType,
    },
    /// Single-barrier knock-in/knock-out option.
    Barrier {
        /// Call or put.
        option_type: OptionType,
        /// Knock-in or knock-out.
        knock: KnockType,
        /// Barrier level as quoted.
        barrier: Level,
        /// Fixed amount paid if a knock-out extinguishes (or a knock-in
        /// never activates).
        rebate: Option<f64>,
    },
    /// Double-barrier knock-in/knock-out option.
    DoubleBarrier {
        /// Call or put.
        option_type: OptionType,
        /// Knock-in or knock-out.
        knock: KnockType,
        /// Lower barrier as quoted.
        lower: Level,
        /// Upper barrier as quoted.
        upper: Level,
        /// Rebate on extinguishment, as for single barriers.
        rebate: Option<f64>,
    },
    /// One-touch or no-touch digital on a single barrier.
    Touch {
        /// Pays on touch or on no-touch.
        touch: TouchType,
        /// Barrier level as quoted.
        barrier: Level,
        /// Fixed payout per unit notional.
        payout: f64,
    },
    /// Double-touch / double-no-touch digital on a corridor.
    DoubleTouch {
        /// Pays on touch (of either barrier) or on no-touch.
        touch: TouchType,
        /// Lower barrier as quoted.
        lower: Level,
        /// Upper barrier as quoted.
        upper: Level,
        /// Fixed payout per unit notional.
        payout: f64,
    },
    /// Range or outside binary on a corridor.
    Binary {
        /// Range (survival) or outside (exit) payoff.
        style: BinaryStyle,
        /// Lower barrier as quoted.
        lower: Level,
        /// Upper barrier as quoted.
        upper: Level,
        /// Fixed payout per unit notional.
        payout: f64,
    },
}

impl InstrumentKind {
    /// True for linear instruments (forwards and swaps), which carry no
    /// premium and no optionality.
    #[inline]
    pub fn is_linear(&self) -> bool {
        matches!(self, InstrumentKind::Forward | InstrumentKind::Swap)
    }
}

/// An immutable position record to be valued.
///
/// The domestic currency is always EUR; `currency` names the foreign leg.
/// `amount` is the signed notional: positive for long, negative for short.
/// The sign is applied exactly once, at MTM aggregation; pricers are
/// sign-agnostic and always quote from the buyer's side.
///
/// # Examples
///
/// ```
/// use fxmark_core::types::{Currency, Date};
/// use fxmark_models::instruments::{Instrument, InstrumentKind, Level, OptionType};
///
/// let call = Instrument::new(
///     Currency::USD,
///     1_000_000.0,
///     Level::Percentage(100.0),
///     Date::from_ymd(2025, 6, 15).unwrap(),
///     InstrumentKind::Vanilla { option_type: OptionType::Call },
/// )
/// .with_premium(20_000.0);
///
/// assert_eq!(call.premium, Some(20_000.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrument {
    /// Foreign currency of the pair (domestic is EUR).
    pub currency: Currency,
    /// Signed notional in foreign currency units.
    pub amount: f64,
    /// Strike (options) or contracted rate (forwards/swaps), as quoted.
    pub strike: Level,
    /// Maturity date.
    pub maturity: Date,
    /// Premium already paid for optionality; absent for linear kinds.
    pub premium: Option<f64>,
    /// Instrument-specific volatility, overriding the market snapshot.
    pub volatility_override: Option<f64>,
    /// Instrument-specific domestic rate, overriding the market snapshot.
    pub rate_override: Option<f64>,
    /// Product kind with its kind-specific terms.
    pub kind: InstrumentKind,
}

impl Instrument {
    /// Creates an instrument with no premium and no market overrides.
    pub fn new(
        currency: Currency,
        amount: f64,
        strike: Level,
        maturity: Date,
        kind: InstrumentKind,
    ) -> Self {
        Self {
            currency,
            amount,
            strike,
            maturity,
            premium: None,
            volatility_override: None,
            rate_override: None,
            kind,
        }
    }

    /// Sets the premium paid for the position.
    #[must_use]
    pub fn with_premium(mut self, premium: f64) -> Self {
        self.premium = Some(premium);
        self
    }

    /// Overrides the market volatility for this instrument.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility_override = Some(volatility);
        self
    }

    /// Overrides the domestic risk-free rate for this instrument.
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate_override = Some(rate);
        self
    }
}

/// Validation errors raised when resolving an instrument against a
/// market snapshot, before any pricer runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstrumentError {
    /// The market snapshot is missing a required input.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The snapshot carries a non-positive spot rate.
    #[error("non-positive spot rate {spot} for {pair}")]
    NonPositiveSpot {
        /// Offending spot value.
        spot: f64,
        /// Pair code, e.g. EURUSD.
        pair: String,
    },

    /// A resolved strike or barrier level is not positive.
    #[error("resolved {name} must be positive, got {value}")]
    NonPositiveLevel {
        /// Which level failed validation.
        name: &'static str,
        /// Offending resolved value.
        value: f64,
    },

    /// The volatility (override or market) is negative.
    #[error("negative volatility {0}")]
    NegativeVolatility(f64),

    /// A corridor's lower barrier does not lie strictly below its upper.
    #[error("lower barrier {lower} must lie strictly below upper barrier {upper}")]
    BarrierOrder {
        /// Resolved lower barrier.
        lower: f64,
        /// Resolved upper barrier.
        upper: f64,
    },
}
