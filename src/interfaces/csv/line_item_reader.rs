use crate::domain::line_item::{LineItem, TaxRate};
use crate::error::{BillingError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Raw row as typed into an item table. A blank tax rate means no tax.
#[derive(Debug, Deserialize)]
struct LineItemRecord {
    #[serde(default)]
    description: String,
    quantity: Decimal,
    rate: Decimal,
    tax_rate: Option<Decimal>,
}

impl From<LineItemRecord> for LineItem {
    fn from(record: LineItemRecord) -> Self {
        LineItem::new(
            record.description,
            record.quantity,
            record.rate,
            TaxRate::percent(record.tax_rate.unwrap_or(Decimal::ZERO)),
        )
    }
}

/// Reads line items from a CSV source with the header
/// `description,quantity,rate,tax_rate`.
///
/// Whitespace around fields is trimmed and short records are accepted, so a
/// row may leave `tax_rate` off entirely.
pub struct LineItemReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LineItemReader<R> {
    /// Creates a new `LineItemReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes line items.
    pub fn items(self) -> impl Iterator<Item = Result<LineItem>> {
        self.reader
            .into_deserialize::<LineItemRecord>()
            .map(|result| result.map(LineItem::from).map_err(BillingError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "description, quantity, rate, tax_rate\nPanel, 10, 100, 18\nWiring, 2, 49.5, 5";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<Result<LineItem>> = reader.items().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.description, "Panel");
        assert_eq!(first.quantity, dec!(10));
        assert_eq!(first.tax_rate, TaxRate::percent(dec!(18)));
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.unit_rate, dec!(49.5));
    }

    #[test]
    fn test_blank_or_missing_tax_rate_is_zero() {
        let data = "description, quantity, rate, tax_rate\nInstallation, 1, 5000, \nSurvey, 1, 500";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<Result<LineItem>> = reader.items().collect();

        assert_eq!(results[0].as_ref().unwrap().tax_rate, TaxRate::ZERO);
        assert_eq!(results[1].as_ref().unwrap().tax_rate, TaxRate::ZERO);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "description, quantity, rate, tax_rate\nPanel, ten, 100, 18";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<Result<LineItem>> = reader.items().collect();

        assert!(matches!(results[0], Err(BillingError::CsvError(_))));
    }
}
