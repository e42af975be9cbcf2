//! Offline providers with hardcoded data for development and testing.

use converter_types::{CurrencyCode, FetchError, LocationProvider, RateTable, RateTableProvider};

/// Approximate value of one unit of each currency in US dollars.
pub const REFERENCE_RATES_TO_USD: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 1.087),
    ("GBP", 1.266),
    ("INR", 0.01203),
    ("JPY", 0.0067),
    ("XAF", 0.00166),
    ("XOF", 0.00166),
];

/// Rate provider backed by [`REFERENCE_RATES_TO_USD`].
///
/// Tables for any listed base are derived through cross rates.
#[derive(Debug, Clone)]
pub struct StaticRates {
    to_usd: Vec<(CurrencyCode, f64)>,
}

impl Default for StaticRates {
    fn default() -> Self {
        let to_usd = REFERENCE_RATES_TO_USD
            .iter()
            .filter_map(|(code, rate)| CurrencyCode::new(code).ok().map(|c| (c, *rate)))
            .collect();
        Self { to_usd }
    }
}

impl StaticRates {
    /// Builds a provider from custom rates-to-USD.
    pub fn new(to_usd: impl IntoIterator<Item = (CurrencyCode, f64)>) -> Self {
        Self {
            to_usd: to_usd.into_iter().collect(),
        }
    }

    fn to_usd(&self, code: &CurrencyCode) -> Option<f64> {
        self.to_usd
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rate)| *rate)
    }

    /// Cross-rate table for `base`, or `None` when `base` is not listed.
    pub fn table(&self, base: &CurrencyCode) -> Option<RateTable> {
        let base_to_usd = self.to_usd(base)?;
        let rates = self
            .to_usd
            .iter()
            .map(|(code, to_usd)| (code.clone(), base_to_usd / to_usd));
        Some(RateTable::new(base.clone(), rates))
    }
}

#[async_trait::async_trait]
impl RateTableProvider for StaticRates {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        self.table(base)
            .ok_or_else(|| FetchError::Provider(format!("Unsupported base currency: {}", base)))
    }
}

/// Location provider that always reports the same currency.
#[derive(Debug, Clone)]
pub struct FixedLocation(pub CurrencyCode);

#[async_trait::async_trait]
impl LocationProvider for FixedLocation {
    async fn detect_currency(&self) -> Result<CurrencyCode, FetchError> {
        Ok(self.0.clone())
    }
}
