//! # Converter Types
//!
//! Port traits and error types for the currency converter.
//! This crate has no IO of its own - only trait definitions, the error
//! taxonomy and the notices shown to a user.
//!
//! ## Architecture
//!
//! - `ports/` - Trait definitions that provider adapters must implement
//! - `error/` - Fetch and application error types
//! - `notice/` - User-visible notifications

pub mod error;
pub mod notice;
pub mod ports;

// Re-export the pure core so adapters only need this crate.
pub use exchange_rates::{
    ConversionRequest, ConversionResult, ConvertError, CurrencyCode, FlagResolver, RateTable, Side,
};

pub use error::{AppError, FetchError};
pub use notice::{Notice, NoticeLevel};
pub use ports::{LocationProvider, RateTableProvider};
