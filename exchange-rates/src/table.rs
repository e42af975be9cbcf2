//! Rate tables relative to a single base currency.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::CurrencyCode;

/// Rates for every known currency, expressed relative to `base`.
///
/// A table is built once per fetch and never mutated afterwards. The base
/// always maps to `1.0`, and only positive finite rates are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    base: CurrencyCode,
    rates: BTreeMap<CurrencyCode, f64>,
    last_updated: Option<DateTime<Utc>>,
}

impl RateTable {
    pub fn new(base: CurrencyCode, rates: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        let mut rates: BTreeMap<CurrencyCode, f64> = rates
            .into_iter()
            .filter(|(_, rate)| is_usable_rate(*rate))
            .collect();
        rates.insert(base.clone(), 1.0);
        Self {
            base,
            rates,
            last_updated: None,
        }
    }

    /// Attaches the upstream's last-update timestamp.
    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Units of `code` per one unit of the base currency.
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// Available codes in sorted order.
    pub fn codes(&self) -> Vec<CurrencyCode> {
        self.rates.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, f64)> {
        self.rates.iter().map(|(code, rate)| (code, *rate))
    }
}

pub(crate) fn is_usable_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}
