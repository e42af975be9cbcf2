//! ConverterService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use converter_types::{
        AppError, ConversionRequest, ConvertError, CurrencyCode, FetchError, LocationProvider,
        RateTable, RateTableProvider, Side,
    };

    use crate::ConverterService;

    pub fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    type Rates = Vec<(&'static str, f64)>;

    /// Scripted rate provider that records every base it is asked for.
    pub struct MockRates {
        script: Mutex<VecDeque<(Duration, Result<Rates, FetchError>)>>,
        default: Result<Rates, FetchError>,
        calls: Mutex<Vec<CurrencyCode>>,
    }

    impl MockRates {
        pub fn with_rates(rates: &[(&'static str, f64)]) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                default: Ok(rates.to_vec()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: FetchError) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                default: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queues a one-off response served after `delay`.
        pub fn then(self, delay: Duration, rates: &[(&'static str, f64)]) -> Self {
            self.script
                .lock()
                .unwrap()
                .push_back((delay, Ok(rates.to_vec())));
            self
        }

        pub fn calls(&self) -> Vec<CurrencyCode> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RateTableProvider for MockRates {
        async fn fetch_rates(&self, base: &CurrencyCode) -> Result<RateTable, FetchError> {
            self.calls.lock().unwrap().push(base.clone());
            let next = {
                let mut script = self.script.lock().unwrap();
                script.pop_front()
            };
            let (delay, outcome) = next.unwrap_or((Duration::ZERO, self.default.clone()));
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            outcome.map(|rates| {
                RateTable::new(
                    base.clone(),
                    rates.into_iter().map(|(c, r)| (code(c), r)),
                )
            })
        }
    }

    pub struct MockLocation {
        outcome: Result<CurrencyCode, FetchError>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl MockLocation {
        pub fn detecting(c: &str) -> Self {
            Self {
                outcome: Ok(code(c)),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(err: FetchError) -> Self {
            Self {
                outcome: Err(err),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LocationProvider for MockLocation {
        async fn detect_currency(&self) -> Result<CurrencyCode, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    fn service(rates: MockRates) -> ConverterService<MockRates, MockLocation> {
        ConverterService::new(rates, MockLocation::detecting("USD"))
    }

    #[tokio::test]
    async fn test_convert_usd_to_eur() {
        let service = service(MockRates::with_rates(&[("EUR", 0.92)]));

        let result = service
            .convert(&ConversionRequest::new(100.0, code("USD"), code("EUR")))
            .await
            .unwrap();

        assert_eq!(result.amount, dec!(92.00));
        assert_eq!(result.to_string(), "92.00");
        assert_eq!(service.rates().calls(), vec![code("USD")]);
    }

    #[tokio::test]
    async fn test_convert_fetches_with_source_as_base() {
        let service = service(MockRates::with_rates(&[("USD", 1.15)]));

        service
            .convert(&ConversionRequest::new(10.0, code("GBP"), code("USD")))
            .await
            .unwrap();

        assert_eq!(service.rates().calls(), vec![code("GBP")]);
    }

    #[tokio::test]
    async fn test_convert_zero_amount_makes_no_request() {
        let service = service(MockRates::with_rates(&[("EUR", 0.92)]));

        let result = service
            .convert(&ConversionRequest::new(0.0, code("USD"), code("EUR")))
            .await;

        assert_eq!(result, Err(AppError::Convert(ConvertError::InvalidAmount)));
        assert!(service.rates().calls().is_empty());
    }

    #[tokio::test]
    async fn test_convert_missing_target_makes_no_request() {
        let service = service(MockRates::with_rates(&[("EUR", 0.92)]));

        let result = service
            .convert(&ConversionRequest {
                amount: 5.0,
                from: Some(code("USD")),
                to: None,
            })
            .await;

        assert_eq!(
            result,
            Err(AppError::Convert(ConvertError::MissingCurrency(Side::To)))
        );
        assert!(service.rates().calls().is_empty());
    }

    #[tokio::test]
    async fn test_convert_rate_unavailable() {
        let service = service(MockRates::with_rates(&[("EUR", 0.92)]));

        let result = service
            .convert(&ConversionRequest::new(5.0, code("USD"), code("XDR")))
            .await;

        assert!(matches!(
            result,
            Err(AppError::Convert(ConvertError::RateUnavailable { .. }))
        ));
        assert_eq!(service.rates().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_convert_network_failure() {
        let service = service(MockRates::failing(FetchError::Network("refused".into())));

        let result = service
            .convert(&ConversionRequest::new(5.0, code("USD"), code("EUR")))
            .await;

        assert_eq!(
            result,
            Err(AppError::Fetch(FetchError::Network("refused".into())))
        );
    }

    #[tokio::test]
    async fn test_load_currencies_uses_reference_base() {
        let service = service(MockRates::with_rates(&[("EUR", 0.92), ("INR", 83.1)]))
            .with_reference_base(code("EUR"));

        let table = service.load_currencies().await.unwrap();

        assert_eq!(service.rates().calls(), vec![code("EUR")]);
        assert_eq!(table.codes(), vec![code("EUR"), code("INR")]);
    }

    #[tokio::test]
    async fn test_detect_location() {
        let service = ConverterService::new(
            MockRates::with_rates(&[]),
            MockLocation::detecting("JPY"),
        );

        assert_eq!(service.detect_location().await, Ok(code("JPY")));
        assert_eq!(service.location().calls(), 1);
    }

    #[test]
    fn test_flag_urls() {
        let service = service(MockRates::with_rates(&[]));

        assert_eq!(service.flag_url(None), None);
        assert_eq!(
            service.flag_url(Some(&code("XOF"))).as_deref(),
            Some("https://currency.world/img/flags/tg.png")
        );

        let options = service.currency_options(&[code("EUR"), code("XAF")]);
        assert_eq!(
            options,
            vec![
                (code("EUR"), Some("https://flagcdn.com/w40/eu.png".to_string())),
                (code("XAF"), Some("https://flagcdn.com/w40/cm.png".to_string())),
            ]
        );
    }
}
