//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_client::{DEFAULT_EXCHANGE_RATE_API_URL, DEFAULT_LOCATION_API_URL};
use exchange_rates::{CurrencyCode, DEFAULT_FLAG_TEMPLATE};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub rates_url: String,
    pub location_url: String,
    pub flag_template: String,
    pub reference_currency: CurrencyCode,
    pub default_target: CurrencyCode,
    pub fallback_currency: CurrencyCode,
    pub http_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_key = lookup("EXCHANGE_RATE_API_KEY").filter(|k| !k.trim().is_empty());

        let rates_url = lookup("EXCHANGE_RATE_API_URL")
            .unwrap_or_else(|| DEFAULT_EXCHANGE_RATE_API_URL.to_string());
        let location_url =
            lookup("LOCATION_API_URL").unwrap_or_else(|| DEFAULT_LOCATION_API_URL.to_string());
        let flag_template =
            lookup("FLAG_URL_TEMPLATE").unwrap_or_else(|| DEFAULT_FLAG_TEMPLATE.to_string());

        let reference_currency = currency(&lookup, "REFERENCE_CURRENCY")?;
        let default_target = currency(&lookup, "DEFAULT_TARGET_CURRENCY")?;
        let fallback_currency = currency(&lookup, "FALLBACK_CURRENCY")?;

        let http_timeout = Duration::from_secs(
            lookup("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a whole number of seconds"))?,
        );

        Ok(Self {
            api_key,
            rates_url,
            location_url,
            flag_template,
            reference_currency,
            default_target,
            fallback_currency,
            http_timeout,
        })
    }

    pub fn require_api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!("EXCHANGE_RATE_API_KEY environment variable is required (or use --offline)")
        })
    }
}

fn currency(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<CurrencyCode> {
    match lookup(key) {
        Some(value) => {
            CurrencyCode::new(&value).map_err(|e| anyhow::anyhow!("{}: {}", key, e))
        }
        None => Ok(CurrencyCode::usd()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.rates_url, DEFAULT_EXCHANGE_RATE_API_URL);
        assert_eq!(config.location_url, DEFAULT_LOCATION_API_URL);
        assert_eq!(config.flag_template, DEFAULT_FLAG_TEMPLATE);
        assert_eq!(config.reference_currency, CurrencyCode::usd());
        assert_eq!(config.default_target, CurrencyCode::usd());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("EXCHANGE_RATE_API_KEY", "abc123"),
            ("DEFAULT_TARGET_CURRENCY", "eur"),
            ("HTTP_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "abc123");
        assert_eq!(config.default_target.as_str(), "EUR");
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = config(&[("EXCHANGE_RATE_API_KEY", "  ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config(&[("REFERENCE_CURRENCY", "dollars")]).is_err());
        assert!(config(&[("HTTP_TIMEOUT_SECS", "soon")]).is_err());
    }
}
