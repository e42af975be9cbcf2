//! Port traits (interfaces for provider adapters).
//!
//! The orchestrator depends on these traits, not on concrete HTTP clients.

mod location;
mod rates;

pub use location::LocationProvider;
pub use rates::RateTableProvider;
