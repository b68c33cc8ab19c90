use crate::domain::money::Money;
use crate::domain::tax::{DocumentTotals, TaxBreakdown};
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 7] = ["line", "description", "taxable", "cgst", "sgst", "igst", "amount"];

/// Writes a document's item table and its total row as CSV.
///
/// Amounts are rounded to two decimals here and nowhere earlier.
pub struct BreakdownWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BreakdownWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_totals(&mut self, totals: &DocumentTotals) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for (index, line) in totals.lines.iter().enumerate() {
            self.write_row(
                &(index + 1).to_string(),
                &line.description,
                line.taxable_amount,
                &line.tax,
                line.amount,
            )?;
        }
        self.write_row(
            "",
            "TOTAL",
            totals.subtotal,
            &totals.tax,
            totals.grand_total,
        )?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_row(
        &mut self,
        line: &str,
        description: &str,
        taxable: Money,
        tax: &TaxBreakdown,
        amount: Money,
    ) -> Result<()> {
        let amounts = [taxable, tax.cgst, tax.sgst, tax.igst, amount].map(|m| m.plain());
        let mut record = vec![line, description];
        record.extend(amounts.iter().map(String::as_str));
        self.writer.write_record(&record)?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}
