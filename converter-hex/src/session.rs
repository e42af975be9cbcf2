//! A mounted converter.
//!
//! A [`Session`] owns one [`SelectionState`] for as long as the hosting view is
//! alive. Provider calls run outside the lock; their outcomes are folded back
//! in through [`SelectionState::apply`] as soon as each one resolves. After
//! [`Session::unmount`] late outcomes are dropped instead of applied.

use std::sync::{Mutex, MutexGuard, PoisonError};

use converter_types::{
    AppError, ConversionResult, CurrencyCode, LocationProvider, Notice, RateTableProvider,
};
use tracing::debug;

use crate::service::ConverterService;
use crate::state::{Event, SelectionState};

struct Mounted {
    state: SelectionState,
    notices: Vec<Notice>,
}

pub struct Session<R: RateTableProvider, L: LocationProvider> {
    service: ConverterService<R, L>,
    mounted: Mutex<Option<Mounted>>,
}

impl<R: RateTableProvider, L: LocationProvider> Session<R, L> {
    /// Creates a session holding the initial selection state.
    pub fn new(service: ConverterService<R, L>) -> Self {
        Self::with_state(service, SelectionState::default())
    }

    pub fn with_state(service: ConverterService<R, L>, state: SelectionState) -> Self {
        Self {
            service,
            mounted: Mutex::new(Some(Mounted {
                state,
                notices: Vec::new(),
            })),
        }
    }

    pub fn service(&self) -> &ConverterService<R, L> {
        &self.service
    }

    /// Loads the currency list and detects the local currency concurrently.
    ///
    /// Either task may fail without affecting the other.
    pub async fn mount(&self) {
        tokio::join!(self.load_currencies(), self.detect_location());
    }

    /// Also usable on its own to retry after a failed mount.
    pub async fn load_currencies(&self) {
        self.dispatch(Event::CurrenciesRequested);
        let outcome = self.service.load_currencies().await;
        self.dispatch(Event::CurrenciesLoaded(outcome));
    }

    pub async fn detect_location(&self) {
        self.dispatch(Event::LocationRequested);
        let outcome = self.service.detect_location().await;
        self.dispatch(Event::LocationDetected(outcome));
    }

    /// Converts the current selection.
    ///
    /// Returns `None` when the session was already unmounted. Overlapping
    /// calls are allowed; whichever resolves last owns `result`.
    pub async fn convert(&self) -> Option<Result<ConversionResult, AppError>> {
        let request = self.snapshot()?.request();

        if let Err(e) = exchange_rates::validate(&request) {
            self.dispatch(Event::ConversionRejected(e.clone()));
            return Some(Err(e.into()));
        }

        self.dispatch(Event::ConversionStarted);
        let outcome = self.service.convert(&request).await;
        self.dispatch(Event::ConversionFinished(outcome.clone()));
        Some(outcome)
    }

    pub fn set_amount(&self, amount: f64) {
        self.dispatch(Event::AmountChanged(amount));
    }

    pub fn select_from(&self, code: Option<CurrencyCode>) {
        self.dispatch(Event::FromSelected(code));
    }

    pub fn select_to(&self, code: Option<CurrencyCode>) {
        self.dispatch(Event::ToSelected(code));
    }

    pub fn swap(&self) {
        self.dispatch(Event::Swapped);
    }

    /// Copy of the current state, or `None` after unmount.
    pub fn snapshot(&self) -> Option<SelectionState> {
        self.lock().as_ref().map(|m| m.state.clone())
    }

    /// Removes and returns the notices raised so far.
    pub fn take_notices(&self) -> Vec<Notice> {
        self.lock()
            .as_mut()
            .map(|m| std::mem::take(&mut m.notices))
            .unwrap_or_default()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().is_some()
    }

    /// Tears the session down. Pending results are discarded when they arrive.
    pub fn unmount(&self) {
        self.lock().take();
    }

    fn dispatch(&self, event: Event) {
        let mut guard = self.lock();
        let Some(mounted) = guard.as_mut() else {
            debug!(event = event.name(), "Discarding event for unmounted session");
            return;
        };
        let state = std::mem::take(&mut mounted.state);
        let (next, notice) = state.apply(event);
        mounted.state = next;
        mounted.notices.extend(notice);
    }

    fn lock(&self) -> MutexGuard<'_, Option<Mounted>> {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
