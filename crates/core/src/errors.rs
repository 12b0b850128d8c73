//! Core error types for the exchange rate service.

use nbc_fx_market_data::MarketDataError;
use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the service.
///
/// Only two outcomes are visible to clients: a missing configuration key, and
/// everything else. The remaining variants keep the detail for logging.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),
}

impl Error {
    /// Whether the error is a configuration problem rather than a fetch failure
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::MissingConfigKey(_))
    }
}
