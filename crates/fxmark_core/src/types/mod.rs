//! Shared value types: currencies, dates and error categories.

pub mod currency;
pub mod error;
pub mod time;

pub use currency::Currency;
pub use error::{CurrencyError, DateError, MarketDataError};
pub use time::{time_to_expiry, Date};
