//! HTML extraction for the NBC rate page.

use scraper::{ElementRef, Html, Selector};

use super::{OFFICIAL_RATE_SELECTOR, TABLE_CELL_SELECTOR, TABLE_ROW_SELECTOR};
use crate::errors::MarketDataError;
use crate::models::{parse_price, parse_unit, ExchangeRateRow, RateTable};

/// Cells per table row: currency, symbol, unit, bid, ask, average
const EXPECTED_CELLS: usize = 6;

/// Parses the rendered NBC page into a [`RateTable`].
///
/// Extraction is lenient by design of the data source: rows with an
/// unexpected number of cells are skipped, malformed numbers fall back to
/// defaults, and a missing official rate is simply absent. It never fails on
/// page content.
#[derive(Debug)]
pub struct RateExtractor {
    row: Selector,
    cell: Selector,
    official_rate: Selector,
}

impl RateExtractor {
    pub fn new() -> Result<Self, MarketDataError> {
        Ok(Self {
            row: parse_selector(TABLE_ROW_SELECTOR)?,
            cell: parse_selector(TABLE_CELL_SELECTOR)?,
            official_rate: parse_selector(OFFICIAL_RATE_SELECTOR)?,
        })
    }

    /// Extract table rows (in page order) and the official rate text.
    pub fn extract(&self, html: &str) -> RateTable {
        let document = Html::parse_document(html);

        let rows = document
            .select(&self.row)
            .filter_map(|row| self.parse_row(row))
            .collect();

        let official_rate = document
            .select(&self.official_rate)
            .next()
            .map(text_of)
            .filter(|text| !text.is_empty());

        RateTable {
            rows,
            official_rate,
        }
    }

    fn parse_row(&self, row: ElementRef<'_>) -> Option<ExchangeRateRow> {
        let cells: Vec<String> = row.select(&self.cell).map(text_of).collect();
        if cells.len() != EXPECTED_CELLS {
            return None;
        }

        Some(ExchangeRateRow {
            currency: cells[0].clone(),
            symbol: cells[1].clone(),
            unit: parse_unit(&cells[2]),
            bid: parse_price(&cells[3]),
            ask: parse_price(&cells[4]),
            average: parse_price(&cells[5]),
        })
    }
}

fn parse_selector(css: &str) -> Result<Selector, MarketDataError> {
    Selector::parse(css).map_err(|e| MarketDataError::InvalidSelector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
