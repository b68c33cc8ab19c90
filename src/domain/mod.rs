//! Pure billing rules: money, line items, GST computation, document
//! numbering, fiscal years and customer statements.
//!
//! Nothing in here performs I/O except through the traits in [`ports`].

pub mod document_number;
pub mod fiscal;
pub mod line_item;
pub mod money;
pub mod ports;
pub mod rates;
pub mod statement;
pub mod tax;
