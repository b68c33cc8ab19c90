use crate::domain::statement::LedgerEntry;
use crate::error::{BillingError, Result};
use std::io::Read;

/// Reads ledger entries from a CSV source with the header
/// `date,kind,reference,amount`, dates as `YYYY-MM-DD`.
pub struct LedgerReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LedgerReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn entries(self) -> impl Iterator<Item = Result<LedgerEntry>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(BillingError::from))
    }
}
