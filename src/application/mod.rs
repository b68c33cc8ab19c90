//! Application layer orchestrating the billing rules.
//!
//! This module defines the `BillingEngine`, which drafts estimates and
//! invoices (totals plus a proposed number) and finalizes them against the
//! numbering cursor held by a `SequenceStore`.

pub mod engine;
