//! Date handling and time-to-expiry calculation.
//!
//! Valuation is a pure function of an evaluation date, so the engine
//! never reads the wall clock; callers pass the `as_of` date explicitly.
//!
//! # Examples
//!
//! ```
//! use fxmark_core::types::{Date, time_to_expiry};
//!
//! let as_of = Date::from_ymd(2024, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2025, 1, 1).unwrap();
//!
//! // ACT/365, 2024 is a leap year
//! let t = time_to_expiry(maturity, as_of);
//! assert!((t - 366.0 / 365.0).abs() < 1e-12);
//!
//! // Expired instruments clamp to zero
//! assert_eq!(time_to_expiry(as_of, maturity), 0.0);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Days per year under the ACT/365 convention used throughout the engine.
const DAYS_PER_YEAR: f64 = 365.0;

/// Type-safe calendar date, a thin wrapper around [`chrono::NaiveDate`].
///
/// # Examples
///
/// ```
/// use fxmark_core::types::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// assert_eq!(date.year(), 2024);
///
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// assert_eq!(date - start, 166);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a `Date` from year, month and day components.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::InvalidDate`] if the components do not form a
    /// valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Returns the year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns this date shifted by a whole number of days.
    #[inline]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }
}

impl Sub for Date {
    type Output = i64;

    /// Number of calendar days from `rhs` to `self` (negative if earlier).
    fn sub(self, rhs: Self) -> i64 {
        (self.0 - rhs.0).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|_| DateError::ParseError(s.to_string()))
    }
}

/// Time to expiry in years, ACT/365, floored at zero.
///
/// This is the single definition of `T` used by every pricer: calendar
/// days from `as_of` to `maturity` divided by 365, never negative.
#[inline]
pub fn time_to_expiry(maturity: Date, as_of: Date) -> f64 {
    let days = maturity - as_of;
    (days as f64 / DAYS_PER_YEAR).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_ymd_valid() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 2);
        assert_eq!(date.day(), 29);
    }

    #[test]
    fn test_from_ymd_invalid() {
        let err = Date::from_ymd(2023, 2, 29).unwrap_err();
        assert_eq!(
            err,
            DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn test_parse_roundtrip() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        let parsed: Date = date.to_string().parse().unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_parse_error() {
        assert!("not-a-date".parse::<Date>().is_err());
    }

    #[test]
    fn test_day_difference() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let end = Date::from_ymd(2024, 1, 11).unwrap();
        assert_eq!(end - start, 10);
        assert_eq!(start - end, -10);
    }

    #[test]
    fn test_add_days() {
        let start = Date::from_ymd(2024, 12, 30).unwrap();
        assert_eq!(start.add_days(3), Date::from_ymd(2025, 1, 2).unwrap());
    }

    #[test]
    fn test_time_to_expiry_one_year() {
        let as_of = Date::from_ymd(2023, 1, 1).unwrap();
        let maturity = Date::from_ymd(2024, 1, 1).unwrap();
        assert_relative_eq!(time_to_expiry(maturity, as_of), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_time_to_expiry_floor_at_zero() {
        let as_of = Date::from_ymd(2024, 6, 1).unwrap();
        let maturity = Date::from_ymd(2024, 1, 1).unwrap();
        assert_eq!(time_to_expiry(maturity, as_of), 0.0);
    }

    #[test]
    fn test_time_to_expiry_same_day() {
        let d = Date::from_ymd(2024, 6, 1).unwrap();
        assert_eq!(time_to_expiry(d, d), 0.0);
    }
}
