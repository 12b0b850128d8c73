//! NBC FX Market Data Crate
//!
//! This crate knows how to obtain the daily exchange rate table published by
//! the National Bank of Cambodia. The published page only renders its table
//! after a form submit, so the data is fetched with a headless browser and
//! then parsed out of the rendered HTML.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  NbcProvider     |  (ExchangeRateProvider impl)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |   PageDriver     | --> |  rendered HTML   |  (headless Chromium)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  RateExtractor   |  (scraper selectors)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    RateTable     |  (rows + official rate)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ExchangeRateRow`] - One normalized row of the published table
//! - [`RateTable`] - Extractor output, flattened into an ordered row list
//! - [`ExchangeRateProvider`] - Seam between the fetch logic and its callers
//! - [`MarketDataError`] - Everything that can go wrong while scraping

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{ExchangeRateRow, RateTable};
pub use provider::nbc::{NbcProvider, PageDriver, PageDriverConfig, RateExtractor};
pub use provider::ExchangeRateProvider;
