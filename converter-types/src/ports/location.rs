//! Location provider port.

use std::sync::Arc;

use exchange_rates::CurrencyCode;

use crate::error::FetchError;

/// Port trait for detecting the caller's local currency.
///
/// Best-effort: a failure only means there is no default `from` currency.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    async fn detect_currency(&self) -> Result<CurrencyCode, FetchError>;
}

#[async_trait::async_trait]
impl<T: LocationProvider + ?Sized> LocationProvider for Box<T> {
    async fn detect_currency(&self) -> Result<CurrencyCode, FetchError> {
        (**self).detect_currency().await
    }
}

#[async_trait::async_trait]
impl<T: LocationProvider + ?Sized> LocationProvider for Arc<T> {
    async fn detect_currency(&self) -> Result<CurrencyCode, FetchError> {
        (**self).detect_currency().await
    }
}
