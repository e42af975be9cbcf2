//! Currency conversion core.
//!
//! Pure building blocks with no IO: currency codes, rate tables fetched by
//! someone else, the conversion arithmetic and the flag lookup used when
//! displaying a currency.
//!
//! # Example
//! ```
//! use exchange_rates::{ConversionRequest, CurrencyCode, RateTable, convert};
//!
//! let usd: CurrencyCode = "USD".parse().unwrap();
//! let eur: CurrencyCode = "EUR".parse().unwrap();
//! let table = RateTable::new(usd.clone(), [(eur.clone(), 0.92)]);
//!
//! let result = convert(&ConversionRequest::new(100.0, usd, eur), &table).unwrap();
//! assert_eq!(result.to_string(), "92.00");
//! ```

pub mod code;
pub mod engine;
pub mod error;
pub mod flags;
pub mod table;

pub use code::CurrencyCode;
pub use engine::{
    ConversionRequest, ConversionResult, RESULT_DECIMAL_PLACES, convert, parse_amount, validate,
};
pub use error::{ConvertError, Side};
pub use flags::{DEFAULT_FLAG_TEMPLATE, FLAG_OVERRIDES, FlagResolver};
pub use table::RateTable;
