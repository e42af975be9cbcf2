//! Exchange rate provider port.
//!
//! Implementations can be HTTP clients, fixed tables, mocks, etc.

use std::sync::Arc;

use exchange_rates::{CurrencyCode, RateTable};

use crate::error::FetchError;

/// Port trait for exchange rate providers.
///
/// Each call is a single attempt; retrying is up to the caller.
#[async_trait::async_trait]
pub trait RateTableProvider: Send + Sync {
    /// Fetches a fresh table whose rates are relative to `base`.
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError>;
}

#[async_trait::async_trait]
impl<T: RateTableProvider + ?Sized> RateTableProvider for Box<T> {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        (**self).fetch_rates(base).await
    }
}

#[async_trait::async_trait]
impl<T: RateTableProvider + ?Sized> RateTableProvider for Arc<T> {
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        (**self).fetch_rates(base).await
    }
}
