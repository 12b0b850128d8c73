//! Market data models
//!
//! - `rate` - Normalized exchange rate rows (ExchangeRateRow) and the
//!   extractor output they are assembled from (RateTable)

mod rate;

pub use rate::{
    parse_price, parse_unit, ExchangeRateRow, RateTable, OFFICIAL_RATE_CURRENCY, OFFICIAL_RATE_SYMBOL,
};
