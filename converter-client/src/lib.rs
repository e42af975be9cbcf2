//! # Converter Client
//!
//! Provider adapters for the currency converter:
//! - [`ExchangeRateApi`] - rate tables from an exchangerate-api.com v6 style service
//! - [`IpApiLocator`] - local currency from an ipapi.co style geolocation service
//! - [`StaticRates`] / [`FixedLocation`] - offline providers for development and tests

mod exchange_rate_api;
mod fixed;
mod ip_api;

pub use exchange_rate_api::{DEFAULT_EXCHANGE_RATE_API_URL, ExchangeRateApi};
pub use fixed::{FixedLocation, REFERENCE_RATES_TO_USD, StaticRates};
pub use ip_api::{DEFAULT_LOCATION_API_URL, IpApiLocator};

use converter_types::FetchError;
use serde::de::DeserializeOwned;

/// Error type for adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<ClientError> for FetchError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Http(e) => FetchError::Network(e.to_string()),
            e @ ClientError::Status { .. } => FetchError::Network(e.to_string()),
            ClientError::Json(e) => FetchError::Provider(e.to_string()),
            ClientError::Upstream(msg) => FetchError::Provider(msg),
        }
    }
}

/// Decodes a successful response body, or turns the status into an error.
async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                ["error-type", "reason", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(|e| e.as_str()).map(String::from))
            })
            .unwrap_or(body);
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_network() {
        let err = ClientError::Status {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(
            FetchError::from(err),
            FetchError::Network("HTTP 503: down".into())
        );
    }

    #[test]
    fn test_upstream_maps_to_provider() {
        let err = ClientError::Upstream("invalid-key".into());
        assert_eq!(
            FetchError::from(err),
            FetchError::Provider("invalid-key".into())
        );
    }

    #[test]
    fn test_json_maps_to_provider() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            FetchError::from(ClientError::Json(err)),
            FetchError::Provider(_)
        ));
    }
}
