//! Conversion errors.

use std::fmt;

use crate::code::CurrencyCode;

/// Which side of a currency pair a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    From,
    To,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::From => f.write_str("source"),
            Side::To => f.write_str("target"),
        }
    }
}

/// Local validation failures. None of these need a network round-trip to detect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("Enter a valid amount")]
    InvalidAmount,

    #[error("Select a {0} currency")]
    MissingCurrency(Side),

    #[error("Rate not available for {from} -> {to}")]
    RateUnavailable { from: CurrencyCode, to: CurrencyCode },

    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}
