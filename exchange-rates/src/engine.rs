//! Conversion arithmetic.
//!
//! The engine is a pure function of its inputs: it never fetches a table and
//! never remembers anything between calls. The caller supplies a table whose
//! base is the request's `from` currency.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::code::CurrencyCode;
use crate::error::{ConvertError, Side};
use crate::table::{RateTable, is_usable_rate};

/// Fractional digits kept in a conversion result.
pub const RESULT_DECIMAL_PLACES: u32 = 2;

/// A single user-initiated conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: Option<CurrencyCode>,
    pub to: Option<CurrencyCode>,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self {
            amount,
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Outcome of a successful conversion, rounded to two fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub amount: Decimal,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.amount)
    }
}

/// Parses raw amount input such as `"100"` or `"12.5"`.
pub fn parse_amount(input: &str) -> Result<f64, ConvertError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ConvertError::InvalidAmount)?;
    check_amount(amount)?;
    Ok(amount)
}

/// Runs every check that does not need a rate table.
///
/// Returns the validated pair so callers can fetch a table for `from`.
pub fn validate(
    request: &ConversionRequest,
) -> Result<(&CurrencyCode, &CurrencyCode), ConvertError> {
    check_amount(request.amount)?;
    let from = request
        .from
        .as_ref()
        .ok_or(ConvertError::MissingCurrency(Side::From))?;
    let to = request
        .to
        .as_ref()
        .ok_or(ConvertError::MissingCurrency(Side::To))?;
    Ok((from, to))
}

/// Converts `request.amount` from `request.from` into `request.to`.
///
/// `table` is expected to use `from` as its base. The product is rounded to
/// two places with half-away-from-zero semantics.
pub fn convert(
    request: &ConversionRequest,
    table: &RateTable,
) -> Result<ConversionResult, ConvertError> {
    let (from, to) = validate(request)?;

    let rate = table
        .rate(to)
        .filter(|rate| is_usable_rate(*rate))
        .ok_or_else(|| ConvertError::RateUnavailable {
            from: from.clone(),
            to: to.clone(),
        })?;

    let amount = to_decimal(request.amount).ok_or(ConvertError::InvalidAmount)?;
    let factor = to_decimal(rate).ok_or_else(|| ConvertError::RateUnavailable {
        from: from.clone(),
        to: to.clone(),
    })?;
    let product = amount
        .checked_mul(factor)
        .ok_or(ConvertError::InvalidAmount)?;

    let mut rounded =
        product.round_dp_with_strategy(RESULT_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(RESULT_DECIMAL_PLACES);

    Ok(ConversionResult {
        amount: rounded,
        from: from.clone(),
        to: to.clone(),
        rate,
    })
}

// Goes through the shortest round-trip text form, so 0.92 stays 0.92 rather
// than its binary expansion.
fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_str(&value.to_string()).ok()
}

fn check_amount(amount: f64) -> Result<(), ConvertError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ConvertError::InvalidAmount)
    }
}
