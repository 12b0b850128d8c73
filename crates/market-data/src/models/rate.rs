use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency label of the synthetic official rate row
pub const OFFICIAL_RATE_CURRENCY: &str = "Official Exchange Rate";

/// Symbol of the synthetic official rate row
pub const OFFICIAL_RATE_SYMBOL: &str = "KHR/USD";

/// One row of the published exchange rate table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateRow {
    /// Currency name as printed on the page (e.g. "US Dollar")
    pub currency: String,

    /// Pair symbol (e.g. "KHR/USD")
    pub symbol: String,

    /// Number of foreign units the quote refers to
    pub unit: u32,

    /// Bank buying rate
    pub bid: Decimal,

    /// Bank selling rate
    pub ask: Decimal,

    /// Mid rate
    pub average: Decimal,
}

impl ExchangeRateRow {
    /// Builds the synthetic row for the separately published official rate.
    /// All three prices carry the same value.
    pub fn official(rate: Decimal) -> Self {
        Self {
            currency: OFFICIAL_RATE_CURRENCY.to_string(),
            symbol: OFFICIAL_RATE_SYMBOL.to_string(),
            unit: 1,
            bid: rate,
            ask: rate,
            average: rate,
        }
    }

    /// Whether this row is the synthetic official rate row
    pub fn is_official(&self) -> bool {
        self.currency == OFFICIAL_RATE_CURRENCY && self.symbol == OFFICIAL_RATE_SYMBOL
    }
}

/// Parses a unit cell from its leading digits. Blank, non-numeric or zero
/// text yields 1.
pub fn parse_unit(text: &str) -> u32 {
    let text = strip_grouping(text);
    match leading_number(&text, false).parse::<u32>() {
        Ok(unit) if unit > 0 => unit,
        _ => 1,
    }
}

/// Parses a price cell from its leading number, so "4105 KHR" reads as 4105.
/// Blank or non-numeric text yields 0.
pub fn parse_price(text: &str) -> Decimal {
    let text = strip_grouping(text);
    leading_number(&text, true)
        .parse::<Decimal>()
        .unwrap_or(Decimal::ZERO)
}

// The page prints thousands with a comma separator ("4,105").
fn strip_grouping(text: &str) -> String {
    text.trim().chars().filter(|c| *c != ',').collect()
}

/// Longest prefix of `text` that reads as a number: an optional sign, digits
/// and, when `fraction` is set, a decimal point followed by digits.
fn leading_number(text: &str, fraction: bool) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if fraction && bytes.get(end) == Some(&b'.') {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > end + 1 {
            end = frac_end;
        }
    }
    &text[..end]
}

/// Everything extracted from one rendered rate page
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateTable {
    /// Table rows in page order
    pub rows: Vec<ExchangeRateRow>,

    /// Trimmed text of the official rate element, if the page published one
    pub official_rate: Option<String>,
}

impl RateTable {
    /// Flattens the table into the published order: official rate first,
    /// followed by the table rows as they appeared on the page.
    pub fn into_rates(self) -> Vec<ExchangeRateRow> {
        let mut rates = Vec::with_capacity(self.rows.len() + 1);
        if let Some(text) = self.official_rate.as_deref() {
            rates.push(ExchangeRateRow::official(parse_price(text)));
        }
        rates.extend(self.rows);
        rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd_row() -> ExchangeRateRow {
        ExchangeRateRow {
            currency: "US Dollar".to_string(),
            symbol: "KHR/USD".to_string(),
            unit: 1,
            bid: dec!(4090),
            ask: dec!(4130),
            average: dec!(4110),
        }
    }

    #[test]
    fn test_official_row_uses_rate_for_all_prices() {
        let row = ExchangeRateRow::official(dec!(4105));

        assert_eq!(row.currency, "Official Exchange Rate");
        assert_eq!(row.symbol, "KHR/USD");
        assert_eq!(row.unit, 1);
        assert_eq!(row.bid, dec!(4105));
        assert_eq!(row.ask, dec!(4105));
        assert_eq!(row.average, dec!(4105));
        assert!(row.is_official());
    }

    #[test]
    fn test_table_row_with_same_symbol_is_not_official() {
        assert!(!usd_row().is_official());
    }

    #[test]
    fn test_into_rates_prepends_official_rate() {
        let table = RateTable {
            rows: vec![usd_row()],
            official_rate: Some("4,105".to_string()),
        };

        let rates = table.into_rates();

        assert_eq!(rates.len(), 2);
        assert!(rates[0].is_official());
        assert_eq!(rates[1], usd_row());
    }

    #[test]
    fn test_into_rates_without_official_rate_keeps_rows_only() {
        let table = RateTable {
            rows: vec![usd_row()],
            official_rate: None,
        };

        let rates = table.into_rates();

        assert_eq!(rates, vec![usd_row()]);
        assert!(rates.iter().all(|r| !r.is_official()));
    }

    #[test]
    fn test_unparseable_official_rate_still_produces_row() {
        let table = RateTable {
            rows: Vec::new(),
            official_rate: Some("n/a".to_string()),
        };

        let rates = table.into_rates();

        assert_eq!(rates, vec![ExchangeRateRow::official(Decimal::ZERO)]);
    }

    #[test]
    fn test_parse_unit_fallbacks() {
        assert_eq!(parse_unit("100"), 100);
        assert_eq!(parse_unit(" 1,000 "), 1000);
        assert_eq!(parse_unit(""), 1);
        assert_eq!(parse_unit("abc"), 1);
        assert_eq!(parse_unit("0"), 1);
        assert_eq!(parse_unit("-5"), 1);
    }

    #[test]
    fn test_parse_unit_reads_leading_digits() {
        assert_eq!(parse_unit("100 units"), 100);
        assert_eq!(parse_unit("12.5"), 12);
        assert_eq!(parse_unit("+10"), 10);
        assert_eq!(parse_unit("x10"), 1);
    }

    #[test]
    fn test_parse_price_fallbacks() {
        assert_eq!(parse_price("4,105"), dec!(4105));
        assert_eq!(parse_price("26.45"), dec!(26.45));
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("   "), Decimal::ZERO);
        assert_eq!(parse_price("N/A"), Decimal::ZERO);
        assert_eq!(parse_price("-"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_reads_leading_number() {
        assert_eq!(parse_price("4105 KHR"), dec!(4105));
        assert_eq!(parse_price("4,105.50 Riel"), dec!(4105.50));
        assert_eq!(parse_price("26.45*"), dec!(26.45));
        assert_eq!(parse_price("4105."), dec!(4105));
        assert_eq!(parse_price("-1.5"), dec!(-1.5));
    }

    #[test]
    fn test_row_serializes_prices_as_numbers() {
        let json = serde_json::to_value(usd_row()).unwrap();

        assert_eq!(json["currency"], "US Dollar");
        assert_eq!(json["unit"], 1);
        assert_eq!(json["bid"], 4090.0);
        assert_eq!(json["average"], 4110.0);
    }
}
