use crate::domain::statement::{EntryKind, Statement};
use crate::error::Result;
use std::io::Write;

/// Writes a statement of accounts as CSV: an opening row, one row per entry
/// with its running balance, and a closing balance-due row.
pub struct StatementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StatementWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_statement(&mut self, statement: &Statement) -> Result<()> {
        let summary = &statement.summary;
        self.writer
            .write_record(["date", "transaction", "reference", "amount", "payment", "balance"])?;

        let opening_date = statement
            .period
            .map(|fy| fy.start().to_string())
            .unwrap_or_default();
        let opening = summary.opening_balance.plain();
        self.writer.write_record([
            opening_date.as_str(),
            "Opening Balance",
            "",
            "",
            "",
            opening.as_str(),
        ])?;

        for line in &statement.lines {
            let entry = &line.entry;
            let (kind, amount, payment) = match entry.kind {
                EntryKind::Invoice => ("Invoice", entry.amount.plain(), String::new()),
                EntryKind::Payment => ("Payment", String::new(), entry.amount.plain()),
            };
            let date = entry.date.to_string();
            let balance = line.balance.plain();
            self.writer.write_record([
                date.as_str(),
                kind,
                entry.reference.as_str(),
                amount.as_str(),
                payment.as_str(),
                balance.as_str(),
            ])?;
        }

        let closing = [
            summary.invoiced_amount,
            summary.amount_paid,
            summary.balance_due,
        ]
        .map(|m| m.plain());
        let mut record = vec!["", "Balance Due", ""];
        record.extend(closing.iter().map(String::as_str));
        self.writer.write_record(&record)?;
        self.writer.flush()?;
        Ok(())
    }
}
