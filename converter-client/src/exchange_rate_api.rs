//! Rate tables from an exchangerate-api.com v6 compatible service.

use std::collections::HashMap;

use chrono::DateTime;
use converter_types::{CurrencyCode, FetchError, RateTable, RateTableProvider};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::{ClientError, read_json};

pub const DEFAULT_EXCHANGE_RATE_API_URL: &str = "https://v6.exchangerate-api.com/v6";

/// Body of `GET /{key}/latest/{base}`.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    base_code: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
    time_last_update_unix: Option<i64>,
}

/// Exchange rate API client.
pub struct ExchangeRateApi {
    base_url: String,
    api_key: String,
    http: Client,
}

impl ExchangeRateApi {
    /// Creates a client against the public service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_EXCHANGE_RATE_API_URL.to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    /// Points the client at another compatible service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    fn latest_url(&self, base: &CurrencyCode) -> String {
        format!("{}/{}/latest/{}", self.base_url, self.api_key, base)
    }

    async fn fetch_latest(&self, base: &CurrencyCode) -> Result<RateTable, ClientError> {
        let resp = self.http.get(self.latest_url(base)).send().await?;
        let body: LatestResponse = read_json(resp).await?;

        if body.result.as_deref() == Some("error") {
            return Err(ClientError::Upstream(
                body.error_type.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let raw_rates = body
            .conversion_rates
            .ok_or_else(|| ClientError::Upstream("response has no conversion_rates".to_string()))?;

        let table_base = match body.base_code {
            Some(code) => CurrencyCode::new(&code)
                .map_err(|e| ClientError::Upstream(e.to_string()))?,
            None => base.clone(),
        };
        if &table_base != base {
            warn!(requested = %base, returned = %table_base, "Upstream answered with a different base");
        }

        let mut rates = Vec::with_capacity(raw_rates.len());
        for (code, rate) in raw_rates {
            match CurrencyCode::new(&code) {
                Ok(parsed) => rates.push((parsed, rate)),
                Err(_) => warn!(code = %code, "Skipping unparseable currency code"),
            }
        }

        let mut table = RateTable::new(table_base, rates);
        if let Some(at) = body.time_last_update_unix.and_then(|secs| DateTime::from_timestamp(secs, 0)) {
            table = table.with_last_updated(at);
        }
        Ok(table)
    }
}

#[async_trait::async_trait]
impl RateTableProvider for ExchangeRateApi {
    #[instrument(skip(self), fields(base = %base))]
    async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
        let table = self.fetch_latest(base).await?;
        info!("Fetched {} exchange rates", table.len());
        Ok(table)
    }
}
