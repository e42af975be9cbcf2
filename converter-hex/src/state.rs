//! Selection state and its transitions.
//!
//! [`SelectionState`] is plain owned data. Every change goes through
//! [`SelectionState::apply`], which consumes the old state and returns the next
//! one together with an optional notice for the user. Nothing here performs IO.

use converter_types::{
    AppError, ConversionRequest, ConversionResult, ConvertError, CurrencyCode, FetchError, Notice,
    RateTable,
};

/// Work currently in flight. All flags clear means idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub fetching_currencies: bool,
    pub detecting_location: bool,
    pub converting: bool,
}

impl Activity {
    pub fn is_idle(&self) -> bool {
        !(self.fetching_currencies || self.detecting_location || self.converting)
    }
}

/// Everything a converter widget shows.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Codes offered in both selectors. Empty until the currency list loads.
    pub currencies: Vec<CurrencyCode>,
    pub from: Option<CurrencyCode>,
    pub to: Option<CurrencyCode>,
    pub amount: f64,
    pub result: Option<ConversionResult>,
    pub loading: Activity,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            currencies: Vec::new(),
            from: None,
            to: Some(CurrencyCode::usd()),
            amount: 0.0,
            result: None,
            loading: Activity::default(),
        }
    }
}

/// Inputs that move the state forward.
#[derive(Debug, Clone)]
pub enum Event {
    CurrenciesRequested,
    CurrenciesLoaded(Result<RateTable, FetchError>),
    LocationRequested,
    LocationDetected(Result<CurrencyCode, FetchError>),
    AmountChanged(f64),
    FromSelected(Option<CurrencyCode>),
    ToSelected(Option<CurrencyCode>),
    Swapped,
    /// Local validation failed; no request was made.
    ConversionRejected(ConvertError),
    ConversionStarted,
    ConversionFinished(Result<ConversionResult, AppError>),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::CurrenciesRequested => "currencies_requested",
            Event::CurrenciesLoaded(_) => "currencies_loaded",
            Event::LocationRequested => "location_requested",
            Event::LocationDetected(_) => "location_detected",
            Event::AmountChanged(_) => "amount_changed",
            Event::FromSelected(_) => "from_selected",
            Event::ToSelected(_) => "to_selected",
            Event::Swapped => "swapped",
            Event::ConversionRejected(_) => "conversion_rejected",
            Event::ConversionStarted => "conversion_started",
            Event::ConversionFinished(_) => "conversion_finished",
        }
    }
}

impl SelectionState {
    /// The conversion the current selection describes.
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest {
            amount: self.amount,
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }

    /// Exchanges `from` and `to` in one step. An empty side swaps like any other value.
    pub fn swapped(mut self) -> Self {
        std::mem::swap(&mut self.from, &mut self.to);
        self
    }

    pub fn apply(mut self, event: Event) -> (Self, Option<Notice>) {
        let notice = match event {
            Event::CurrenciesRequested => {
                self.loading.fetching_currencies = true;
                None
            }
            Event::CurrenciesLoaded(Ok(table)) => {
                self.currencies = table.codes();
                self.loading.fetching_currencies = false;
                None
            }
            Event::CurrenciesLoaded(Err(e)) => {
                self.loading.fetching_currencies = false;
                Some(Notice::warning("Error getting exchange rates").with_detail(e.to_string()))
            }
            Event::LocationRequested => {
                self.loading.detecting_location = true;
                None
            }
            Event::LocationDetected(Ok(code)) => {
                if self.from.is_none() {
                    self.from = Some(code);
                }
                self.loading.detecting_location = false;
                None
            }
            Event::LocationDetected(Err(e)) => {
                self.loading.detecting_location = false;
                Some(AppError::LocationDetectionFailed(e).notice())
            }
            Event::AmountChanged(amount) => {
                self.amount = amount;
                None
            }
            Event::FromSelected(code) => {
                self.from = code;
                None
            }
            Event::ToSelected(code) => {
                self.to = code;
                None
            }
            Event::Swapped => return (self.swapped(), None),
            Event::ConversionRejected(e) => Some(AppError::Convert(e).notice()),
            Event::ConversionStarted => {
                self.loading.converting = true;
                None
            }
            Event::ConversionFinished(Ok(result)) => {
                self.result = Some(result);
                self.loading.converting = false;
                None
            }
            Event::ConversionFinished(Err(e)) => {
                self.loading.converting = false;
                Some(e.notice())
            }
        };
        (self, notice)
    }
}
