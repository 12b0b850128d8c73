//! NBC FX Core - snapshot cache and the exchange rate service.
//!
//! This crate owns the cache-or-fetch decision. It does not know how rates
//! are scraped; that is behind the `ExchangeRateProvider` trait from the
//! market data crate.

pub mod cache;
pub mod constants;
pub mod errors;
pub mod fx;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
