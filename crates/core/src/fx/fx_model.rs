use chrono::{DateTime, SecondsFormat, Utc};
use nbc_fx_market_data::ExchangeRateRow;
use serde::Serialize;

/// The exchange rate table as fetched at one point in time.
///
/// This is the unit that is cached and returned to clients. It is never
/// modified after construction; a refresh builds a new snapshot.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRateSnapshot {
    #[serde(serialize_with = "serialize_iso_millis")]
    date: DateTime<Utc>,
    rates: Vec<ExchangeRateRow>,
}

impl ExchangeRateSnapshot {
    pub fn new(date: DateTime<Utc>, rates: Vec<ExchangeRateRow>) -> Self {
        Self { date, rates }
    }

    /// When the rates were fetched
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Rates in published order, official rate first when present
    pub fn rates(&self) -> &[ExchangeRateRow] {
        &self.rates
    }
}

/// Serializes as `2024-05-01T08:30:00.123Z`.
fn serialize_iso_millis<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_snapshot_json_shape() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let snapshot = ExchangeRateSnapshot::new(
            date,
            vec![
                ExchangeRateRow::official(dec!(4105)),
                ExchangeRateRow {
                    currency: "Euro".to_string(),
                    symbol: "KHR/EUR".to_string(),
                    unit: 1,
                    bid: dec!(4431),
                    ask: dec!(4476),
                    average: dec!(4453.5),
                },
            ],
        );

        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["date"], "2024-05-01T08:30:00.000Z");
        assert_eq!(json["rates"][0]["symbol"], "KHR/USD");
        assert_eq!(json["rates"][0]["bid"], 4105.0);
        assert_eq!(json["rates"][1]["currency"], "Euro");
        assert_eq!(json["rates"][1]["average"], 4453.5);
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
