//! Foreign-leg currency codes.
//!
//! Every exposure in the engine is quoted against EUR: an instrument on
//! `Currency::USD` is priced off the EUR/USD spot rate. The domestic leg
//! is therefore implicit and never appears as a variant here.
//!
//! # Examples
//!
//! ```
//! use fxmark_core::types::Currency;
//!
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(usd.pair_code(), "EURUSD");
//!
//! // Parse from string (case-insensitive)
//! let gbp: Currency = "gbp".parse().unwrap();
//! assert_eq!(gbp, Currency::GBP);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 code of the foreign leg of a EUR-quoted currency pair.
///
/// The set is closed over the pairs the default market snapshot carries.
///
/// # Examples
///
/// ```
/// use fxmark_core::types::Currency;
///
/// assert_eq!(Currency::JPY.pair_code(), "EURJPY");
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// United States Dollar
    USD,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
}

impl Currency {
    /// Returns the ISO 4217 three-letter currency code.
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
        }
    }

    /// Returns the EUR-quoted pair code, e.g. `"EURUSD"`.
    ///
    /// This is the key format used by market data feeds and by the
    /// dashboard's instrument records.
    #[inline]
    pub fn pair_code(&self) -> &'static str {
        match self {
            Currency::USD => "EURUSD",
            Currency::GBP => "EURGBP",
            Currency::JPY => "EURJPY",
            Currency::CHF => "EURCHF",
        }
    }

    /// Returns all supported foreign currencies.
    #[inline]
    pub fn all() -> [Currency; 4] {
        [Currency::USD, Currency::GBP, Currency::JPY, Currency::CHF]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            other => Err(CurrencyError::UnknownCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::GBP.code(), "GBP");
        assert_eq!(Currency::JPY.code(), "JPY");
        assert_eq!(Currency::CHF.code(), "CHF");
    }

    #[test]
    fn test_pair_codes() {
        for ccy in Currency::all() {
            assert_eq!(ccy.pair_code(), format!("EUR{}", ccy.code()));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Chf".parse::<Currency>().unwrap(), Currency::CHF);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "XAU".parse::<Currency>().unwrap_err();
        assert_eq!(err, CurrencyError::UnknownCurrency("XAU".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Currency::JPY), "JPY");
    }
}
