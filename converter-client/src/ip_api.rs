//! Local currency detection via IP geolocation.

use converter_types::{CurrencyCode, FetchError, LocationProvider};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::{ClientError, read_json};

pub const DEFAULT_LOCATION_API_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Deserialize)]
struct LocationResponse {
    currency: Option<String>,
    #[serde(default)]
    error: bool,
    reason: Option<String>,
}

/// ipapi.co style geolocation client.
///
/// A response without a `currency` field resolves to the fallback code.
pub struct IpApiLocator {
    url: String,
    fallback: CurrencyCode,
    http: Client,
}

impl Default for IpApiLocator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION_API_URL)
    }
}

impl IpApiLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fallback: CurrencyCode::usd(),
            http: Client::new(),
        }
    }

    /// Sets the code used when the service does not report a currency.
    pub fn with_fallback(mut self, fallback: CurrencyCode) -> Self {
        self.fallback = fallback;
        self
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    async fn lookup(&self) -> Result<CurrencyCode, ClientError> {
        let resp = self.http.get(&self.url).send().await?;
        let body: LocationResponse = read_json(resp).await?;

        if body.error {
            return Err(ClientError::Upstream(
                body.reason.unwrap_or_else(|| "lookup failed".to_string()),
            ));
        }

        match body.currency {
            Some(code) => CurrencyCode::new(&code).map_err(|e| ClientError::Upstream(e.to_string())),
            None => Ok(self.fallback.clone()),
        }
    }
}

#[async_trait::async_trait]
impl LocationProvider for IpApiLocator {
    #[instrument(skip(self))]
    async fn detect_currency(&self) -> Result<CurrencyCode, FetchError> {
        let code = self.lookup().await?;
        info!(currency = %code, "Detected local currency");
        Ok(code)
    }
}
