//! # Converter Hex
//!
//! Application layer for the currency converter.
//!
//! ## Architecture
//!
//! - `state/` - Selection state and its pure transition function
//! - `service/` - Application service (provider calls + conversion engine)
//! - `session/` - A mounted converter that folds service outcomes into state
//!
//! The service is generic over `R: RateTableProvider` and
//! `L: LocationProvider`, allowing different adapters to be injected.

pub mod service;
pub mod session;
pub mod state;

#[cfg(test)]
mod service_tests;

pub use service::ConverterService;
pub use session::Session;
pub use state::{Activity, Event, SelectionState};
