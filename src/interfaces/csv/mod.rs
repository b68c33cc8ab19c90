//! CSV adapters for line items, ledger entries and computed breakdowns.

pub mod breakdown_writer;
pub mod ledger_reader;
pub mod line_item_reader;
pub mod statement_writer;
