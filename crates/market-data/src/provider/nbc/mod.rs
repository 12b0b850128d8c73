//! National Bank of Cambodia exchange rate provider.
//!
//! The NBC page renders today's table only after its date form is submitted
//! with an empty date, so fetching is split in two:
//! - [`PageDriver`] drives a headless browser through the form and returns the
//!   rendered HTML
//! - [`RateExtractor`] parses that HTML into a [`RateTable`]
//!
//! The selectors below are the contract with the external page. They break
//! whenever NBC changes its markup.

mod driver;
mod extractor;

pub use driver::{PageDriver, PageDriverConfig};
pub use extractor::RateExtractor;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::RateTable;
use crate::provider::ExchangeRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "NBC";

/// Date input of the rate form
pub const DATE_INPUT_SELECTOR: &str = "#datepicker";

/// Submit button of the rate form
pub const SUBMIT_SELECTOR: &str = r#"input[type="submit"]"#;

/// Appears once the result table has been rendered
pub const TABLE_READY_SELECTOR: &str = ".tbl-responsive";

/// Body rows of the result table
pub const TABLE_ROW_SELECTOR: &str = "table.tbl-responsive tbody tr";

/// Cells of one table row
pub const TABLE_CELL_SELECTOR: &str = "td";

/// Element holding the official KHR/USD rate
pub const OFFICIAL_RATE_SELECTOR: &str = "#fm-ex > table > tbody > tr:nth-child(2) > td > font";

/// Fetches the NBC rate table with a headless browser.
pub struct NbcProvider {
    driver: PageDriver,
    extractor: RateExtractor,
}

impl NbcProvider {
    /// Create a provider driving the browser with the given configuration.
    pub fn new(config: PageDriverConfig) -> Result<Self, MarketDataError> {
        Ok(Self {
            driver: PageDriver::new(config),
            extractor: RateExtractor::new()?,
        })
    }
}

#[async_trait]
impl ExchangeRateProvider for NbcProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_rate_table(&self, url: &str) -> Result<RateTable, MarketDataError> {
        let html = self.driver.load_rate_page(url).await?;
        let table = self.extractor.extract(&html);
        debug!(
            "{}: extracted {} rows, official rate {}",
            PROVIDER_ID,
            table.rows.len(),
            if table.official_rate.is_some() {
                "present"
            } else {
                "absent"
            }
        );
        Ok(table)
    }
}
