//! Converter Application Service
//!
//! Talks to the providers and runs the conversion engine.
//! Holds no selection state - that lives in [`crate::state`].

use converter_types::{
    AppError, ConversionRequest, ConversionResult, CurrencyCode, FetchError, FlagResolver,
    LocationProvider, RateTable, RateTableProvider,
};
use tracing::{debug, instrument, warn};

/// Application service for currency conversion.
///
/// Generic over the rate and location providers so HTTP clients, fixed
/// tables and test mocks can be swapped in.
pub struct ConverterService<R: RateTableProvider, L: LocationProvider> {
    rates: R,
    location: L,
    flags: FlagResolver,
    reference_base: CurrencyCode,
}

impl<R: RateTableProvider, L: LocationProvider> ConverterService<R, L> {
    pub fn new(rates: R, location: L) -> Self {
        Self {
            rates,
            location,
            flags: FlagResolver::default(),
            reference_base: CurrencyCode::usd(),
        }
    }

    pub fn with_flags(mut self, flags: FlagResolver) -> Self {
        self.flags = flags;
        self
    }

    /// Base used only to enumerate the available currencies.
    pub fn with_reference_base(mut self, base: CurrencyCode) -> Self {
        self.reference_base = base;
        self
    }

    pub fn rates(&self) -> &R {
        &self.rates
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn flags(&self) -> &FlagResolver {
        &self.flags
    }

    /// Fetches a table against the reference base to learn which codes exist.
    #[instrument(skip(self), fields(base = %self.reference_base))]
    pub async fn load_currencies(&self) -> Result<RateTable, FetchError> {
        let result = self.rates.fetch_rates(&self.reference_base).await;
        if let Err(e) = &result {
            warn!("Could not load currency list: {}", e);
        }
        result
    }

    #[instrument(skip(self))]
    pub async fn detect_location(&self) -> Result<CurrencyCode, FetchError> {
        let result = self.location.detect_currency().await;
        if let Err(e) = &result {
            warn!("Could not detect local currency: {}", e);
        }
        result
    }

    /// Validates locally, then fetches a fresh table with `from` as base and converts.
    ///
    /// Invalid input fails before any request is made.
    #[instrument(skip(self, req), fields(amount = req.amount))]
    pub async fn convert(&self, req: &ConversionRequest) -> Result<ConversionResult, AppError> {
        let (from, _) = exchange_rates::validate(req)?;

        let table = self.rates.fetch_rates(from).await?;
        let result = exchange_rates::convert(req, &table)?;

        debug!(
            "Converted {} {} to {} {} at rate {}",
            req.amount, result.from, result, result.to, result.rate
        );
        Ok(result)
    }

    /// Flag image for a selected code; `None` when nothing is selected.
    pub fn flag_url(&self, code: Option<&CurrencyCode>) -> Option<String> {
        code.and_then(|c| self.flags.resolve(c.as_str()))
    }

    /// Codes paired with their flag URLs, as shown in a currency selector.
    pub fn currency_options(&self, codes: &[CurrencyCode]) -> Vec<(CurrencyCode, Option<String>)> {
        codes
            .iter()
            .map(|code| (code.clone(), self.flags.resolve(code.as_str())))
            .collect()
    }
}
