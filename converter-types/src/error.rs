//! Error types for the currency converter.

use exchange_rates::ConvertError;

use crate::notice::Notice;

/// Provider-level errors (anything that went wrong talking to an upstream).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or a non-success HTTP status.
    #[error("Network error: {0}")]
    Network(String),

    /// The upstream answered, but not with the shape we expect.
    #[error("Unexpected provider response: {0}")]
    Provider(String),
}

/// Application-level errors.
///
/// Every variant maps to a [`Notice`] the host shows to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Location detection failed: {0}")]
    LocationDetectionFailed(#[source] FetchError),
}

impl AppError {
    /// Error-level notice for a failed user action.
    pub fn notice(&self) -> Notice {
        match self {
            AppError::Convert(e) => Notice::error(e.to_string()),
            AppError::Fetch(e) => Notice::error("Error converting currency").with_detail(e.to_string()),
            AppError::LocationDetectionFailed(e) => {
                Notice::warning("Error detecting user location").with_detail(e.to_string())
            }
        }
    }
}
