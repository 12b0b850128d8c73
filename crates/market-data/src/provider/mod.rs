//! Exchange rate provider abstraction and the NBC implementation.
//!
//! This module contains:
//! - The `ExchangeRateProvider` trait callers depend on
//! - The `nbc` provider, which drives the NBC rate page in a headless browser
//!   and extracts the published table
//!
//! Callers only ever hold an `Arc<dyn ExchangeRateProvider>`, which keeps the
//! browser out of unit tests for the cache and service layers.

mod traits;

pub mod nbc;

pub use traits::ExchangeRateProvider;
